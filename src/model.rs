use crate::schema;
use serde::{Deserialize, Deserializer};

#[derive(Debug, Deserialize)]
pub struct RunnersEnvelope {
    pub data: Option<Vec<RunnerModel>>,
}

#[derive(Debug, Deserialize)]
pub struct RegisterEnvelope {
    pub data: Option<RunnerModel>,
}

#[derive(Debug, Deserialize)]
pub struct UploadEnvelope {
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RunnerModel {
    #[serde(rename = "_id", alias = "id")]
    pub id: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub citizen_id: Option<String>,
    #[serde(default, deserialize_with = "de_age")]
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub distance: Option<String>,
    pub shirt_size: Option<String>,
    pub bib: Option<String>,
    pub reward: Option<String>,
    #[serde(default, deserialize_with = "de_flag")]
    pub vip: Option<bool>,
    #[serde(default, deserialize_with = "de_flag")]
    pub shirt_status: Option<bool>,
    #[serde(default, deserialize_with = "de_flag")]
    pub registration_status: Option<bool>,
    #[serde(default, deserialize_with = "de_flag")]
    pub health_package: Option<bool>,
    pub hospital: Option<String>,
    pub medical_condition: Option<String>,
    pub medications: Option<String>,
    pub note: Option<String>,
    pub image_url: Option<String>,
}

// the multipart channel turns booleans into the tokens "true"/"false" and
// numbers into digit strings, and the backend hands some of them back that way
fn de_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Flag(bool),
        Text(String),
    }

    return match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Flag(b)) => Ok(Some(b)),
        Some(Raw::Text(t)) => Ok(Some(t == "true")),
    };
}

fn de_age<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(i64),
        Float(f64),
        Text(String),
    }

    return match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Num(n)) => Ok(Some(n)),
        Some(Raw::Float(f)) => Ok(Some(f as i64)),
        Some(Raw::Text(t)) => Ok(t.trim().parse::<i64>().ok()),
    };
}

/// Rows without an id cannot be edited or deleted, so they never enter the store
pub fn runner_model2schema(m: RunnerModel) -> Option<schema::Runner> {
    let id = match m.id {
        Some(i) => i,
        None => return None,
    };

    return Some(schema::Runner {
        id,
        full_name: m.full_name.unwrap_or_default(),
        phone: m.phone.unwrap_or_default(),
        citizen_id: m.citizen_id.unwrap_or_default(),
        age: m.age,
        gender: m.gender.unwrap_or_default(),
        distance: m.distance.unwrap_or_default(),
        shirt_size: m.shirt_size.unwrap_or_default(),
        bib: m.bib.unwrap_or_default(),
        reward: m.reward.unwrap_or_default(),
        vip: m.vip.unwrap_or(false),
        shirt_status: m.shirt_status.unwrap_or(false),
        registration_status: m.registration_status.unwrap_or(false),
        health_package: m.health_package.unwrap_or(false),
        hospital: m.hospital.unwrap_or_default(),
        medical_condition: m.medical_condition.unwrap_or_default(),
        medications: m.medications.unwrap_or_default(),
        note: m.note.unwrap_or_default(),
        image_url: m.image_url,
    });
}
