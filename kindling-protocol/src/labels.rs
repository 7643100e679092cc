//! Attribute keys set by the analyzers.

pub const DNS_DOMAIN: &str = "dns_domain";
pub const DNS_IP: &str = "dns_ip";
pub const DNS_ID: &str = "dns_id";
pub const DNS_RCODE: &str = "dns_rcode";
pub const IS_ERROR: &str = "is_error";
pub const ERROR_TYPE: &str = "error_type";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i64)]
pub enum ErrorType {
    NoError = 0,
    ConnectFail = 1,
    NoResponse = 2,
    Protocol = 3,
}
