pub mod ms {
    pub const POLL_INTERVAL: u64 = 100;
    pub const VIEWPORT_SETTLE: u64 = 50;
    pub const PAGE_LOAD_SETTLE: u64 = 300;
    pub const DOUBLE_CLICK_GAP: u64 = 50;
}

pub mod secs {
    pub const WAIT_TIMEOUT: u64 = 5;
    pub const NAVIGATION: u64 = 30;
    pub const REQUEST: u64 = 120;
}
