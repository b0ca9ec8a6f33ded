//! Fixed protocol literals
//!
//! Every byte the composer writes that is not caller data comes from this
//! table. The content-length formula in [`crate::request`] sums the lengths
//! of these constants, so a change here changes both sides at once.

use std::time::Duration;

/// Control port shared by all renderer services
pub const UPNP_PORT: u16 = 1400;

/// Time allowed between finishing the request and the first response byte
pub const RESPONSE_TIMEOUT: Duration = Duration::from_millis(3000);

// HTTP header block
pub const HTTP_POST: &str = "POST ";
pub const HTTP_VERSION: &str = " HTTP/1.1\n";
pub const HEADER_HOST: &str = "Host: ";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type: text/xml; charset=\"utf-8\"\n";
pub const HEADER_CONTENT_LENGTH: &str = "Content-Length: ";
pub const HEADER_SOAP_ACTION: &str = "SOAPAction: \"urn:";
pub const HEADER_SOAP_ACTION_END: &str = "\"\n";
pub const HEADER_CONNECTION: &str = "Connection: close\n";
pub const LINE_END: &str = "\n";

// SOAP envelope
pub const SOAP_ENVELOPE_START: &str = "<s:Envelope xmlns:s=\"http://schemas.xmlsoap.org/soap/envelope/\" s:encodingStyle=\"http://schemas.xmlsoap.org/soap/encoding/\">";
pub const SOAP_ENVELOPE_END: &str = "</s:Envelope>";
pub const SOAP_BODY_START: &str = "<s:Body>";
pub const SOAP_BODY_END: &str = "</s:Body>";

/// Root elements every response tag path starts with
pub const SOAP_TAG_ENVELOPE: &str = "s:Envelope";
pub const SOAP_TAG_BODY: &str = "s:Body";

// Action element
pub const ACTION_START_TAG_START: &str = "<u:";
pub const ACTION_START_TAG_NS: &str = " xmlns:u=\"urn:";
pub const ACTION_START_TAG_END: &str = "\">";
pub const ACTION_END_TAG_START: &str = "</u:";
pub const ACTION_END_TAG_END: &str = ">";
pub const UPNP_URN_SCHEMA: &str = "schemas-upnp-org:service:";
pub const INSTANCE_ID_0_TAG: &str = "<InstanceID>0</InstanceID>";

// Field element: `<` name `>` ... `</` name `>`
pub const FIELD_OPEN_START: &str = "<";
pub const FIELD_CLOSE_START: &str = "</";
pub const FIELD_TAG_END: &str = ">";

/// Bytes the action open/close tags add around the action name and service
pub const ACTION_TAG_LEN: usize = ACTION_START_TAG_START.len()
    + ACTION_START_TAG_NS.len()
    + ACTION_START_TAG_END.len()
    + ACTION_END_TAG_START.len()
    + ACTION_END_TAG_END.len();

/// Bytes a field's open and close tags add around two copies of its name
pub const FIELD_TAG_LEN: usize =
    FIELD_OPEN_START.len() + FIELD_TAG_END.len() + FIELD_CLOSE_START.len() + FIELD_TAG_END.len();
