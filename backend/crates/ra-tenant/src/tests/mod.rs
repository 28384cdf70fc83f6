
pub(crate) const BASE_DOMAIN: &str = "roomapp.com";
