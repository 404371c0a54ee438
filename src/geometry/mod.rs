pub(crate) mod polyline;
pub(crate) mod route;
