use clap::ValueEnum;
use modpdu_core::pdu::{Parsed, Pdu, RequestBody, ResponseBody};
use modpdu_core::{NoMatch, ValidationError};
use thiserror::Error;

/// Which body family a buffer should be decoded as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BodyKind {
    Request,
    Response,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedBody {
    Request(RequestBody),
    Response(ResponseBody),
}

impl DecodedBody {
    pub fn as_pdu(&self) -> &dyn Pdu {
        match self {
            Self::Request(body) => body,
            Self::Response(body) => body,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeFailure {
    #[error("no match: {0}")]
    NoMatch(NoMatch),
    #[error("invalid body: {0}")]
    Invalid(ValidationError),
}

pub fn decode(kind: BodyKind, bytes: &[u8]) -> Result<DecodedBody, DecodeFailure> {
    let parsed = match kind {
        BodyKind::Request => RequestBody::from_buffer(bytes).map(|p| p.map(DecodedBody::Request)),
        BodyKind::Response => {
            ResponseBody::from_buffer(bytes).map(|p| p.map(DecodedBody::Response))
        }
    };
    match parsed {
        Ok(Parsed::Match(body)) => Ok(body),
        Ok(Parsed::NoMatch(reason)) => Err(DecodeFailure::NoMatch(reason)),
        Err(err) => Err(DecodeFailure::Invalid(err)),
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

/// Parse hex bytes, tolerating whitespace, `:`/`-` separators and a `0x` prefix.
pub fn parse_hex(input: &str) -> Result<Vec<u8>, String> {
    let trimmed = input.trim();
    let trimmed = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let digits: String = trimmed
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':' && *c != '-')
        .collect();
    hex::decode(&digits).map_err(|err| format!("invalid hex input {input:?}: {err}"))
}

pub fn format_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn parse_bool(input: &str) -> Result<bool, String> {
    match input.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        _ => Err(format!("invalid bool value: {input}")),
    }
}

#[cfg(test)]
mod tests {
    use super::{decode, format_hex, parse_bool, parse_hex, BodyKind, DecodeFailure, DecodedBody};
    use modpdu_core::pdu::{ReadTextRegistersRequest, RequestBody};
    use modpdu_core::{NoMatch, ValidationError};

    #[test]
    fn parse_hex_accepts_common_spellings() {
        let expected = vec![0x41, 0x00, 0x00, 0x00, 0x01];
        assert_eq!(parse_hex("4100000001").unwrap(), expected);
        assert_eq!(parse_hex("41 00 00 00 01").unwrap(), expected);
        assert_eq!(parse_hex("0x41:00:00:00:01").unwrap(), expected);
        assert_eq!(parse_hex(" 41-00-00-00-01\n").unwrap(), expected);
        assert!(parse_hex("4").is_err());
        assert!(parse_hex("zz").is_err());
    }

    #[test]
    fn format_hex_is_spaced_uppercase() {
        assert_eq!(format_hex(&[0xC1, 0x02, 0x0a]), "C1 02 0A");
        assert_eq!(format_hex(&[]), "");
    }

    #[test]
    fn parse_bool_variants() {
        assert_eq!(parse_bool("ON"), Ok(true));
        assert_eq!(parse_bool("0"), Ok(false));
        assert!(parse_bool("maybe").is_err());
    }

    #[test]
    fn decode_failure_messages_wrap_core_errors() {
        let miss = DecodeFailure::NoMatch(NoMatch::UnsupportedFunction(0x2B));
        assert_eq!(miss.to_string(), "no match: unsupported function code 0x2B");

        let boxed: Box<dyn std::error::Error> =
            Box::new(DecodeFailure::Invalid(ValidationError::InvalidQuantity));
        assert_eq!(boxed.to_string(), "invalid body: quantity out of range");
    }

    #[test]
    fn decode_selects_family() {
        let bytes = [0x41, 0x00, 0x00, 0x00, 0x01];
        let body = decode(BodyKind::Request, &bytes).unwrap();
        assert_eq!(
            body,
            DecodedBody::Request(RequestBody::from(ReadTextRegistersRequest::new(0, 1).unwrap()))
        );
        assert_eq!(body.as_pdu().name(), "ReadTextRegisters");

        assert_eq!(
            decode(BodyKind::Request, &[0x83, 0x02]).unwrap_err(),
            DecodeFailure::NoMatch(NoMatch::UnsupportedFunction(0x83))
        );
        assert!(decode(BodyKind::Response, &[0x83, 0x02]).is_ok());
        assert_eq!(
            decode(BodyKind::Request, &[0x41, 0x00, 0x00, 0x07, 0xD1]).unwrap_err(),
            DecodeFailure::Invalid(ValidationError::InvalidQuantity)
        );
    }
}
