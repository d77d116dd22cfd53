pub(crate) mod category;
pub(crate) mod common;
pub(crate) mod feed;
pub(crate) mod home;
pub(crate) mod layout;
pub(crate) mod post;
