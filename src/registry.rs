//! The mock national identity registry.
//!
//! Profiles are seeded once at start-up and never change at runtime.

use crate::domain::MyKad;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MockUser {
    pub id: String,
    /// Normalized 12-digit MyKad number
    pub my_kad: String,
    pub legal_name: String,
    pub age: u32,
    pub image_url: String,
    pub relationship: String,
    pub current_location: String,
    pub occupation: String,
    pub is_flagged_scammer: bool,
}

#[derive(Debug, Clone)]
pub struct MockRegistry {
    users: Vec<MockUser>,
}

impl MockRegistry {
    pub fn new(users: Vec<MockUser>) -> Self {
        Self { users }
    }

    /// The fixed set of profiles the service ships with.
    pub fn seeded() -> Self {
        Self::new(vec![
            MockUser {
                id: "user_ali".into(),
                my_kad: "030512145521".into(),
                legal_name: "Ali bin Ahmad".into(),
                age: 21,
                image_url: "https://picsum.photos/seed/1/400/400".into(),
                relationship: "Grandson".into(),
                current_location: "Kuala Lumpur, Malaysia".into(),
                occupation: "Student".into(),
                is_flagged_scammer: false,
            },
            MockUser {
                id: "user_siti".into(),
                my_kad: "880214105678".into(),
                legal_name: "Siti Nurhaliza binti Ismail".into(),
                age: 37,
                image_url: "https://picsum.photos/seed/2/400/400".into(),
                relationship: "Daughter".into(),
                current_location: "Penang, Malaysia".into(),
                occupation: "Nurse".into(),
                is_flagged_scammer: false,
            },
            MockUser {
                id: "user_unknown_caller".into(),
                my_kad: "950101016789".into(),
                legal_name: "Tan Wei Ming".into(),
                age: 30,
                image_url: "https://picsum.photos/seed/3/400/400".into(),
                relationship: "Unknown".into(),
                current_location: "Johor Bahru, Malaysia".into(),
                occupation: "Unemployed".into(),
                is_flagged_scammer: true,
            },
        ])
    }

    pub fn find_by_my_kad(&self, my_kad: &MyKad) -> Option<&MockUser> {
        self.users.iter().find(|u| u.my_kad == my_kad.as_ref())
    }

    pub fn find_by_id(&self, id: &str) -> Option<&MockUser> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Resolves an owner identifier, which clients send either as the
    /// registry user id or as a MyKad number.
    pub fn resolve_owner(&self, owner_id: &str) -> Option<&MockUser> {
        self.find_by_id(owner_id).or_else(|| {
            MyKad::parse(owner_id)
                .ok()
                .and_then(|my_kad| self.find_by_my_kad(&my_kad))
        })
    }

    pub fn users(&self) -> &[MockUser] {
        &self.users
    }
}
