pub(super) mod filter_bar;
pub(super) mod popups;
pub(super) mod task_list;
pub(super) mod util;
