use serde::{Deserialize, Serialize};

/// The candidate's master profile, loaded from JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub contact_info: ContactInfo,
    pub summary: String,
    pub work_experience: Vec<WorkExperience>,
    pub skills: Skills,
    #[serde(default)]
    pub education: Vec<Education>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
}

impl ContactInfo {
    /// `email | phone | linkedin`, skipping absent parts.
    pub fn contact_line(&self) -> String {
        std::iter::once(self.email.as_str())
            .chain(self.phone.as_deref())
            .chain(self.linkedin.as_deref())
            .filter(|part| !part.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// One past role. Entries are kept in the profile's order, which is chronological.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkExperience {
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub company_description: String,
    pub dates: String,
    #[serde(default)]
    pub bullet_points: Vec<Bullet>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub text: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Skills {
    #[serde(default)]
    pub technical_skills: Vec<String>,
    #[serde(default)]
    pub soft_skills: Vec<String>,
}

impl Skills {
    /// Technical skills followed by soft skills.
    pub fn all(&self) -> impl Iterator<Item = &str> {
        self.technical_skills
            .iter()
            .chain(self.soft_skills.iter())
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Education {
    pub institution: String,
    pub degree: String,
    #[serde(default)]
    pub dates: Option<String>,
}
