//! Lookup argument parsing
//!
//! Callers that receive identifiers as text (query strings, command lines)
//! turn them into an explicit single or batch argument here, so shape errors
//! are rejected before any cache or loader is involved.

use std::str::FromStr;

use crate::domain::DomainError;

/// A validated lookup argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupArgument<Id> {
    One(Id),
    Many(Vec<Id>),
}

impl<Id> LookupArgument<Id> {
    /// Builds a batch argument, rejecting an empty list
    pub fn many(ids: Vec<Id>) -> Result<Self, DomainError> {
        if ids.is_empty() {
            return Err(DomainError::invalid_argument("identifier list is empty"));
        }
        Ok(Self::Many(ids))
    }
}

impl<Id: FromStr> LookupArgument<Id> {
    /// Parses `"7"` as a single identifier and `"1,2,3"` as a batch
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(DomainError::invalid_argument("no identifier given"));
        }

        if !raw.contains(',') {
            return parse_one(raw).map(Self::One);
        }

        let ids = raw
            .split(',')
            .map(|part| parse_one(part.trim()))
            .collect::<Result<Vec<Id>, _>>()?;

        Self::many(ids)
    }
}

fn parse_one<Id: FromStr>(raw: &str) -> Result<Id, DomainError> {
    raw.parse()
        .map_err(|_| DomainError::invalid_argument(format!("'{}' is not a valid identifier", raw)))
}
