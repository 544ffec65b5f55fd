use std::{error::Error, fmt};

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use hideseek_core::LayoutRequest;

const TICKET_DOMAIN: &str = "arena";
const TICKET_VERSION: &str = "v1";

/// Identifier prefix emitted before the seed and encoded request.
pub(crate) const TICKET_HEADER: &str = "arena:v1";
/// Delimiter used to separate the prefix, seed and payload.
const FIELD_DELIMITER: char = ':';

/// Seed and request that together reproduce a generated arena.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct LayoutTicket {
    /// Seed of the random generator.
    pub seed: u64,
    /// Request the arena was generated from.
    pub request: LayoutRequest,
}

impl LayoutTicket {
    /// Encodes the ticket into a single-line string suitable for sharing.
    pub(crate) fn encode(&self) -> Result<String, LayoutTransferError> {
        let json = serde_json::to_vec(&self.request).map_err(LayoutTransferError::InvalidPayload)?;
        let encoded = STANDARD_NO_PAD.encode(json);
        Ok(format!("{TICKET_HEADER}:{}:{encoded}", self.seed))
    }

    /// Decodes a ticket from the provided string representation.
    pub(crate) fn decode(value: &str) -> Result<Self, LayoutTransferError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(LayoutTransferError::EmptyPayload);
        }

        let mut parts = trimmed.split(FIELD_DELIMITER);
        let domain = parts.next().ok_or(LayoutTransferError::MissingPrefix)?;
        let version = parts.next().ok_or(LayoutTransferError::MissingVersion)?;
        let seed = parts.next().ok_or(LayoutTransferError::MissingSeed)?;
        let payload = parts.next().ok_or(LayoutTransferError::MissingPayload)?;

        if domain != TICKET_DOMAIN {
            return Err(LayoutTransferError::InvalidPrefix(domain.to_owned()));
        }
        if version != TICKET_VERSION {
            return Err(LayoutTransferError::UnsupportedVersion(version.to_owned()));
        }

        let seed = seed
            .trim()
            .parse::<u64>()
            .map_err(|_| LayoutTransferError::InvalidSeed(seed.to_owned()))?;
        let bytes = STANDARD_NO_PAD
            .decode(payload.as_bytes())
            .map_err(LayoutTransferError::InvalidEncoding)?;
        let request: LayoutRequest =
            serde_json::from_slice(&bytes).map_err(LayoutTransferError::InvalidPayload)?;

        Ok(Self { seed, request })
    }
}

/// Errors that can occur while encoding or decoding layout tickets.
#[derive(Debug)]
pub(crate) enum LayoutTransferError {
    /// The provided string was empty or contained only whitespace.
    EmptyPayload,
    /// The prefix segment was missing from the ticket.
    MissingPrefix,
    /// The ticket did not contain a version segment.
    MissingVersion,
    /// The ticket did not include a seed.
    MissingSeed,
    /// The ticket did not include the payload segment.
    MissingPayload,
    /// The ticket used an unexpected prefix segment.
    InvalidPrefix(String),
    /// The ticket used an unsupported version identifier.
    UnsupportedVersion(String),
    /// The seed could not be parsed from the ticket.
    InvalidSeed(String),
    /// The base64 payload could not be decoded.
    InvalidEncoding(base64::DecodeError),
    /// The request could not be serialised or deserialised.
    InvalidPayload(serde_json::Error),
}

impl fmt::Display for LayoutTransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPayload => write!(f, "layout ticket was empty"),
            Self::MissingPrefix => write!(f, "layout ticket is missing the prefix"),
            Self::MissingVersion => write!(f, "layout ticket is missing the version"),
            Self::MissingSeed => write!(f, "layout ticket is missing the seed"),
            Self::MissingPayload => write!(f, "layout ticket is missing the payload"),
            Self::InvalidPrefix(prefix) => write!(f, "ticket prefix '{prefix}' is not supported"),
            Self::UnsupportedVersion(version) => {
                write!(f, "ticket version '{version}' is not supported")
            }
            Self::InvalidSeed(seed) => write!(f, "could not parse ticket seed '{seed}'"),
            Self::InvalidEncoding(error) => {
                write!(f, "could not decode ticket payload: {error}")
            }
            Self::InvalidPayload(error) => {
                write!(f, "could not process ticket payload: {error}")
            }
        }
    }
}

impl Error for LayoutTransferError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidEncoding(error) => Some(error),
            Self::InvalidPayload(error) => Some(error),
            _ => None,
        }
    }
}
