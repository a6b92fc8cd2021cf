use serde::Serialize;

pub const GENDER_BUCKETS: [&str; 3] = ["ชาย", "หญิง", "อื่น ๆ"];
pub const DISTANCE_BUCKETS: [&str; 2] = ["5.1", "10.5"];
pub const SHIRT_SIZE_BUCKETS: [&str; 11] = [
    "3S", "2S", "S", "M", "L", "XL", "2XL", "3XL", "4XL", "5XL", "6XL",
];
/// Bucket order for boolean facets, in the wire token form
pub const FLAG_BUCKETS: [&str; 2] = ["true", "false"];

/// A runner without an assigned bib carries this placeholder
pub const BIB_PENDING: &str = "กำลังดำเนินการ";
pub const BIB_PENDING_EN: &str = "In progress";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Runner {
    pub id: String,
    pub full_name: String,
    pub phone: String,
    pub citizen_id: String,
    pub age: Option<i64>,
    pub gender: String,
    pub distance: String,
    pub shirt_size: String,
    pub bib: String,
    pub reward: String,
    pub vip: bool,
    pub shirt_status: bool,
    pub registration_status: bool,
    pub health_package: bool,
    pub hospital: String,
    pub medical_condition: String,
    pub medications: String,
    pub note: String,
    pub image_url: Option<String>,
}

impl Runner {
    /// true when the medical notes hold something a race marshal should see
    pub fn needs_medical_attention(&self) -> bool {
        let condition = self.medical_condition.trim();
        return condition != "" && condition != "ไม่มี" && condition != "-";
    }
}

/// booleans travel as these exact tokens in multipart fields
pub fn flag_text(flag: bool) -> &'static str {
    return if flag { "true" } else { "false" };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank_runner() -> Runner {
        Runner {
            id: "r1".to_string(),
            full_name: "".to_string(),
            phone: "".to_string(),
            citizen_id: "".to_string(),
            age: None,
            gender: "".to_string(),
            distance: "".to_string(),
            shirt_size: "".to_string(),
            bib: "".to_string(),
            reward: "".to_string(),
            vip: false,
            shirt_status: false,
            registration_status: false,
            health_package: false,
            hospital: "".to_string(),
            medical_condition: "".to_string(),
            medications: "".to_string(),
            note: "".to_string(),
            image_url: None,
        }
    }

    #[test]
    fn medical_flag_ignores_the_none_markers() {
        let mut runner = blank_runner();
        assert!(!runner.needs_medical_attention());

        runner.medical_condition = "ไม่มี".to_string();
        assert!(!runner.needs_medical_attention());

        runner.medical_condition = " - ".to_string();
        assert!(!runner.needs_medical_attention());

        runner.medical_condition = "หอบหืด".to_string();
        assert!(runner.needs_medical_attention());
    }

    #[test]
    fn flag_tokens() {
        assert_eq!(flag_text(true), "true");
        assert_eq!(flag_text(false), "false");
    }
}
