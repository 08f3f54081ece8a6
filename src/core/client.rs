use serde::{Deserialize, Serialize};

/// Commercial status of a client account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClientStatus {
    Active,
    Onboarding,
    Churned,
}

/// A client record from the agency's directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    /// Short display name
    pub name: String,
    /// Legal company name
    pub company: String,
    pub status: ClientStatus,
    /// Monthly recurring revenue
    pub mrr: u32,
    /// Account health score, 0..=100
    pub health: u8,
    /// Number of running projects
    pub projects: u32,
}

/// The figures a client report is written from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientMetrics {
    pub mrr: u32,
    pub projects: u32,
    pub health: u8,
}

impl Client {
    pub fn metrics(&self) -> ClientMetrics {
        ClientMetrics {
            mrr: self.mrr,
            projects: self.projects,
            health: self.health,
        }
    }
}
