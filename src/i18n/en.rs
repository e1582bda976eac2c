pub const BTN_PREV: &str = "Previous";
pub const BTN_NEXT: &str = "Next";
pub const TEXT_LOADINGIMG: &str = "Loading…";
pub const TEXT_IMG_UNAVAILABLE: &str = "Image unavailable";
