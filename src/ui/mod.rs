pub mod gallery_view;
pub mod pagination_controller;
