//! Machine usage count submission data structures

use serde::{Deserialize, Serialize};

/// Number of count fields in a submission (9 machine categories x day/night).
pub const FIELD_COUNT: usize = 18;

/// Column labels in the order the regression models were trained against.
///
/// This order is also the column order of the prediction log sheet.
pub const FIELD_LABELS: [&str; FIELD_COUNT] = [
    "Knitting - D",
    "Knitting - N",
    "Bulk Dye - D",
    "Bulk Dye - N",
    "Sample Dye - D",
    "Sample Dye - N",
    "Dryers - D",
    "Dryers - N",
    "Presetting - D",
    "Presetting - N",
    "Chillers - D",
    "Chillers - N",
    "AHU - D",
    "AHU - N",
    "Compressor - D",
    "Compressor - N",
    "Luwa - D",
    "Luwa - N",
];

/// Operator-entered machine counts for one submission.
///
/// Every field is independently optional; unset fields are treated as zero
/// when the feature vector is assembled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineCounts {
    /// Knitting machines running on the day shift
    #[serde(alias = "Knitting - D")]
    pub knitting_day: Option<u32>,

    /// Knitting machines running on the night shift
    #[serde(alias = "Knitting - N")]
    pub knitting_night: Option<u32>,

    /// Bulk dye machines, day shift
    #[serde(alias = "Bulk Dye - D")]
    pub bulk_dye_day: Option<u32>,

    /// Bulk dye machines, night shift
    #[serde(alias = "Bulk Dye - N")]
    pub bulk_dye_night: Option<u32>,

    /// Sample dye machines, day shift
    #[serde(alias = "Sample Dye - D")]
    pub sample_dye_day: Option<u32>,

    /// Sample dye machines, night shift
    #[serde(alias = "Sample Dye - N")]
    pub sample_dye_night: Option<u32>,

    /// Dryers, day shift
    #[serde(alias = "Dryers - D")]
    pub dryers_day: Option<u32>,

    /// Dryers, night shift
    #[serde(alias = "Dryers - N")]
    pub dryers_night: Option<u32>,

    /// Presetting machines, day shift
    #[serde(alias = "Presetting - D")]
    pub presetting_day: Option<u32>,

    /// Presetting machines, night shift
    #[serde(alias = "Presetting - N")]
    pub presetting_night: Option<u32>,

    /// Chillers, day shift
    #[serde(alias = "Chillers - D")]
    pub chillers_day: Option<u32>,

    /// Chillers, night shift
    #[serde(alias = "Chillers - N")]
    pub chillers_night: Option<u32>,

    /// Air handling units, day shift
    #[serde(alias = "AHU - D")]
    pub ahu_day: Option<u32>,

    /// Air handling units, night shift
    #[serde(alias = "AHU - N")]
    pub ahu_night: Option<u32>,

    /// Compressors, day shift
    #[serde(alias = "Compressor - D")]
    pub compressor_day: Option<u32>,

    /// Compressors, night shift
    #[serde(alias = "Compressor - N")]
    pub compressor_night: Option<u32>,

    /// Luwa air engineering units, day shift
    #[serde(alias = "Luwa - D")]
    pub luwa_day: Option<u32>,

    /// Luwa air engineering units, night shift
    #[serde(alias = "Luwa - N")]
    pub luwa_night: Option<u32>,
}

impl MachineCounts {
    /// Resolve the counts into training-schema order, mapping unset fields
    /// to zero.
    pub fn resolved(&self) -> [u32; FIELD_COUNT] {
        [
            self.knitting_day.unwrap_or(0),
            self.knitting_night.unwrap_or(0),
            self.bulk_dye_day.unwrap_or(0),
            self.bulk_dye_night.unwrap_or(0),
            self.sample_dye_day.unwrap_or(0),
            self.sample_dye_night.unwrap_or(0),
            self.dryers_day.unwrap_or(0),
            self.dryers_night.unwrap_or(0),
            self.presetting_day.unwrap_or(0),
            self.presetting_night.unwrap_or(0),
            self.chillers_day.unwrap_or(0),
            self.chillers_night.unwrap_or(0),
            self.ahu_day.unwrap_or(0),
            self.ahu_night.unwrap_or(0),
            self.compressor_day.unwrap_or(0),
            self.compressor_night.unwrap_or(0),
            self.luwa_day.unwrap_or(0),
            self.luwa_night.unwrap_or(0),
        ]
    }

    /// True when every field is unset or zero after defaulting.
    pub fn is_all_zero(&self) -> bool {
        self.resolved().iter().all(|&count| count == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_serialization() {
        let counts = MachineCounts {
            knitting_day: Some(5),
            chillers_night: Some(2),
            ..Default::default()
        };

        let json = serde_json::to_string(&counts).unwrap();
        let deserialized: MachineCounts = serde_json::from_str(&json).unwrap();

        assert_eq!(counts, deserialized);
    }

    #[test]
    fn test_missing_fields_deserialize_as_unset() {
        let counts: MachineCounts = serde_json::from_str(r#"{"dryers_day": 3}"#).unwrap();

        assert_eq!(counts.dryers_day, Some(3));
        assert_eq!(counts.knitting_day, None);
        assert_eq!(counts.resolved()[6], 3);
    }

    #[test]
    fn test_resolved_defaults_unset_to_zero() {
        let counts = MachineCounts {
            luwa_night: Some(7),
            ..Default::default()
        };

        let resolved = counts.resolved();
        assert_eq!(resolved[FIELD_COUNT - 1], 7);
        assert!(resolved[..FIELD_COUNT - 1].iter().all(|&c| c == 0));
    }

    #[test]
    fn test_all_zero_detection() {
        assert!(MachineCounts::default().is_all_zero());

        let explicit_zeros = MachineCounts {
            ahu_day: Some(0),
            compressor_night: Some(0),
            ..Default::default()
        };
        assert!(explicit_zeros.is_all_zero());

        let non_zero = MachineCounts {
            ahu_day: Some(1),
            ..Default::default()
        };
        assert!(!non_zero.is_all_zero());
    }

    #[test]
    fn test_field_labels_match_count() {
        assert_eq!(FIELD_LABELS.len(), FIELD_COUNT);
    }
}
