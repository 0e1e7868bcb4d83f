// src/records/models.rs
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Faculty,
    PhdStudent,
    Postdoc,
    ResearchGroup,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Faculty => "faculty",
            RecordKind::PhdStudent => "phd_student",
            RecordKind::Postdoc => "postdoc",
            RecordKind::ResearchGroup => "research_group",
        }
    }
}

/// A record extracted from one candidate block.
pub trait Entity: Serialize {
    fn kind(&self) -> RecordKind;

    /// Deduplication key: the name for people, the title for groups.
    fn identity(&self) -> &str;

    /// Rendered field lines, absent fields left out.
    fn field_lines(&self) -> Vec<String>;
}

/// Faculty member as listed on the department people page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacultyRecord {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub emails: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub research_areas: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
}

impl Entity for FacultyRecord {
    fn kind(&self) -> RecordKind {
        RecordKind::Faculty
    }

    fn identity(&self) -> &str {
        &self.name
    }

    fn field_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("Name: {}", self.name)];
        if let Some(role) = &self.role {
            lines.push(format!("Role: {}", role));
        }
        if !self.emails.is_empty() {
            lines.push(format!("Email(s): {}", self.emails.join(", ")));
        }
        if let Some(phone) = &self.phone {
            lines.push(format!("Phone: {}", phone));
        }
        if !self.research_areas.is_empty() {
            lines.push("Research Areas:".to_string());
            lines.extend(self.research_areas.iter().map(|area| format!(" - {}", area)));
        }
        if let Some(homepage) = &self.homepage {
            lines.push(format!("Homepage: {}", homepage));
        }
        lines
    }
}

/// PhD student or postdoc; both pages list the same fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberRecord {
    pub kind: RecordKind,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_of_joining: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supervisor: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub emails: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Entity for MemberRecord {
    fn kind(&self) -> RecordKind {
        self.kind
    }

    fn identity(&self) -> &str {
        &self.name
    }

    fn field_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("Name: {}", self.name)];
        if let Some(year) = &self.year_of_joining {
            lines.push(format!("Year of Joining: {}", year));
        }
        if let Some(supervisor) = &self.supervisor {
            lines.push(format!("Supervisor: {}", supervisor));
        }
        if !self.emails.is_empty() {
            lines.push(format!("Email: {}", self.emails.join(", ")));
        }
        if let Some(homepage) = &self.homepage {
            lines.push(format!("Homepage: {}", homepage));
        }
        if let Some(image) = &self.image_url {
            lines.push(format!("Image: {}", image));
        }
        lines
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResearchGroupRecord {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub topics: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
}

impl Entity for ResearchGroupRecord {
    fn kind(&self) -> RecordKind {
        RecordKind::ResearchGroup
    }

    fn identity(&self) -> &str {
        &self.title
    }

    fn field_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("Research Group: {}", self.title)];
        if let Some(image) = &self.image_url {
            lines.push(format!("Image: {}", image));
            lines.push(String::new());
        }
        if let Some(description) = &self.description {
            lines.push("Description:".to_string());
            lines.push(description.clone());
            lines.push(String::new());
        }
        if !self.topics.is_empty() {
            lines.push("Research Topics:".to_string());
            lines.extend(self.topics.iter().map(|topic| format!(" - {}", topic)));
            lines.push(String::new());
        }
        if let Some(homepage) = &self.homepage {
            lines.push(format!("Homepage: {}", homepage));
        }
        lines
    }
}
