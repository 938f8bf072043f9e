pub(crate) mod driver;
pub(crate) mod machine;
pub(crate) mod source;
pub(crate) mod state;
