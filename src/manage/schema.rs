use serde::{Serialize, Deserialize};

pub const MAX_ATTACHMENT_BYTES: usize = 5 * 1024 * 1024;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RunnerForm {
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
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(file_name: &str, bytes: Vec<u8>) -> Attachment {
        return Attachment {
            file_name: file_name.to_string(),
            bytes,
        };
    }

    pub fn size(&self) -> usize {
        return self.bytes.len();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome {
    Registered { image_url: Option<String> }, // the echo of the stored row may carry the hosted file
    Updated,
    Deleted,
    Cancelled,
}
