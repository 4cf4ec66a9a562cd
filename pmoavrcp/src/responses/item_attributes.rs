use serde::Serialize;

use crate::attributes::AttributeSet;
use crate::errors::Result;
use crate::responses::ensure_len;
use crate::types::StatusCode;

const BUNDLE: &str = "item attributes";

/// GetItemAttributes / GetElementAttributes response for one item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ItemAttributeResponse {
    status: StatusCode,
    num_attr: u8,
    attribute_ids: Vec<u32>,
    attribute_values: Vec<String>,
}

impl ItemAttributeResponse {
    pub fn new(
        status: StatusCode,
        num_attr: u8,
        attribute_ids: Vec<u32>,
        attribute_values: Vec<String>,
    ) -> Result<Self> {
        ensure_len(BUNDLE, "attribute ids", num_attr as usize, attribute_ids.len())?;
        ensure_len(
            BUNDLE,
            "attribute values",
            num_attr as usize,
            attribute_values.len(),
        )?;

        Ok(Self {
            status,
            num_attr,
            attribute_ids,
            attribute_values,
        })
    }

    pub fn from_set(status: StatusCode, set: &AttributeSet) -> Result<Self> {
        // The wire count is one octet
        let num_attr = u8::try_from(set.count()).unwrap_or(u8::MAX);
        Self::new(status, num_attr, set.ids().to_vec(), set.values().to_vec())
    }

    /// A bundle with no attributes, for error statuses.
    pub fn status_only(status: StatusCode) -> Self {
        Self {
            status,
            num_attr: 0,
            attribute_ids: Vec::new(),
            attribute_values: Vec::new(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn num_attr(&self) -> u8 {
        self.num_attr
    }

    pub fn attribute_ids(&self) -> &[u32] {
        &self.attribute_ids
    }

    pub fn attribute_values(&self) -> &[String] {
        &self.attribute_values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::BrowseError;

    #[test]
    fn test_matching_arrays() {
        let response = ItemAttributeResponse::new(
            StatusCode::Success,
            2,
            vec![1, 2],
            vec!["Title".into(), "Artist".into()],
        )
        .unwrap();
        assert_eq!(response.num_attr(), 2);
        assert_eq!(response.attribute_values()[1], "Artist");
    }

    #[test]
    fn test_count_mismatch() {
        let err = ItemAttributeResponse::new(StatusCode::Success, 2, vec![1], vec!["a".into()])
            .unwrap_err();
        assert_eq!(err, BrowseError::inconsistent(BUNDLE, "attribute ids", 2, 1));

        let err = ItemAttributeResponse::new(StatusCode::Success, 1, vec![1], vec![]).unwrap_err();
        assert_eq!(
            err,
            BrowseError::inconsistent(BUNDLE, "attribute values", 1, 0)
        );
    }

    #[test]
    fn test_from_set() {
        let set: AttributeSet = [(1u32, "Song"), (3, "Album")].into_iter().collect();
        let response = ItemAttributeResponse::from_set(StatusCode::Success, &set).unwrap();
        assert_eq!(response.attribute_ids(), &[1, 3]);
    }

    #[test]
    fn test_status_only() {
        let response = ItemAttributeResponse::status_only(StatusCode::DoesNotExist);
        assert_eq!(response.status(), StatusCode::DoesNotExist);
        assert_eq!(response.num_attr(), 0);
        assert!(response.attribute_ids().is_empty());
    }
}
