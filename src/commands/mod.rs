pub(crate) mod bootstrap;
pub(crate) mod clean;
pub(crate) mod down;
pub(crate) mod dryrun;
pub(crate) mod enter;
pub(crate) mod goal;
pub(crate) mod introduction;
pub(crate) mod logs;
pub(crate) mod restart;
pub(crate) mod status;
pub(crate) mod test_cmd;
pub(crate) mod up;
