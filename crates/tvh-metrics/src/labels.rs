use tvh_client::Record;

/// Where one label value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelField<'a> {
    /// Record field; a missing value becomes an empty string.
    Optional(&'a str),
    /// Record field; a missing value drops this sample.
    Required(&'a str),
    /// Constant value not read from the record.
    Fixed(&'a str),
}

/// Builds the ordered label values for one sample.
///
/// Returns `None` only when a [`LabelField::Required`] field is absent. The
/// record itself stays usable for every other metric.
pub fn derive_labels(record: &Record, fields: &[LabelField<'_>]) -> Option<Vec<String>> {
    fields
        .iter()
        .map(|field| match field {
            LabelField::Optional(key) => Some(record.text(key).unwrap_or_default()),
            LabelField::Required(key) => record.text(key),
            LabelField::Fixed(value) => Some((*value).to_string()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tvh_client::Record;

    use super::{LabelField, derive_labels};

    fn subscription() -> Record {
        Record::try_from(json!({
            "id": 7,
            "hostname": "10.0.0.4",
            "channel": "BBC Two",
            "title": "",
        }))
        .unwrap()
    }

    #[test]
    fn optional_fields_degrade_to_empty_strings() {
        let labels = derive_labels(
            &subscription(),
            &[
                LabelField::Optional("hostname"),
                LabelField::Optional("username"),
                LabelField::Optional("title"),
            ],
        );
        assert_eq!(
            labels,
            Some(vec!["10.0.0.4".to_string(), String::new(), String::new()])
        );
    }

    #[test]
    fn missing_required_field_skips_the_sample() {
        assert_eq!(
            derive_labels(
                &subscription(),
                &[LabelField::Required("uuid"), LabelField::Optional("channel")],
            ),
            None
        );
        assert_eq!(
            derive_labels(
                &subscription(),
                &[LabelField::Required("id"), LabelField::Fixed("finished")],
            ),
            Some(vec!["7".to_string(), "finished".to_string()])
        );
    }

    #[test]
    fn present_but_empty_required_field_is_kept() {
        assert_eq!(
            derive_labels(&subscription(), &[LabelField::Required("title")]),
            Some(vec![String::new()])
        );
    }
}
