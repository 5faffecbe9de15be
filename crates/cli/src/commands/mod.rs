pub(crate) mod formats;
pub(crate) mod locate;
pub(crate) mod parse;
pub(crate) mod show;
