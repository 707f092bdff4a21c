//! Request and response types for the auth and user-management surface.
//!
//! Every entity gets an explicit DTO with camelCase wire names and a
//! `From<Model>` mapping; password hashes never appear in any response
//! type. Domain CRUD modules define their own request types next to
//! their handlers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::entities::{buyer, farmer, officer};

// ============================================================================
// User types
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Farmer,
    Buyer,
    Officer,
}

impl UserType {
    pub fn as_str(self) -> &'static str {
        match self {
            UserType::Farmer => "farmer",
            UserType::Buyer => "buyer",
            UserType::Officer => "officer",
        }
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Request types
// ============================================================================

/// POST /api/auth/register/farmer request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmerRegistration {
    pub full_name: String,
    pub sex: Option<String>,
    pub age: Option<i32>,
    pub contact_number: Option<String>,
    pub address: Option<String>,
    pub barangay: Option<String>,
    pub municipality: Option<String>,
    pub association_name: Option<String>,
    pub farm_location: Option<String>,
    pub farm_coordinates: Option<String>,
    pub farm_area_hectares: Option<f64>,
    pub years_in_farming: Option<i32>,
    pub type_of_abaca_planted: Option<String>,
    pub average_harvest_volume_kg: Option<f64>,
    pub harvest_frequency_weeks: Option<i32>,
    pub selling_price_range_min: Option<f64>,
    pub selling_price_range_max: Option<f64>,
    pub regular_buyer: Option<String>,
    pub income_per_cycle: Option<f64>,
    pub email: String,
    pub password: String,
    pub profile_photo: Option<String>,
    pub valid_id_photo: Option<String>,
    pub remarks: Option<String>,
}

/// POST /api/auth/register/buyer request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyerRegistration {
    pub business_name: String,
    pub owner_name: String,
    pub business_address: Option<String>,
    pub contact_number: Option<String>,
    pub email: String,
    pub password: String,
    pub license_or_accreditation: Option<String>,
    pub buying_schedule: Option<String>,
    pub buying_location: Option<String>,
    pub warehouse_address: Option<String>,
    pub accepted_quality_grades: Option<Vec<String>>,
    pub price_range_min: Option<f64>,
    pub price_range_max: Option<f64>,
    pub payment_terms: Option<String>,
    pub partnered_associations: Option<Vec<String>>,
    pub profile_photo: Option<String>,
    pub valid_id_photo: Option<String>,
    pub business_permit_photo: Option<String>,
    pub remarks: Option<String>,
}

/// POST /api/auth/register/officer request body.
///
/// Admin-created officers carry only the basic fields; a public
/// registration also supplies position and association.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfficerRegistration {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub profile_picture: Option<String>,
    pub valid_id_photo: Option<String>,
    #[serde(default)]
    pub is_super_admin: bool,
    pub position: Option<String>,
    pub association_name: Option<String>,
    pub contact_number: Option<String>,
    pub address: Option<String>,
    pub term_duration: Option<String>,
    pub remarks: Option<String>,
}

/// POST /api/auth/login request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub user_type: UserType,
}

/// POST /api/auth/refresh request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

// ============================================================================
// Response types
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: PublicUser,
    pub tokens: AuthTokens,
}

/// Mapped account object returned by registration and login.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum PublicUser {
    Farmer(FarmerDto),
    Buyer(BuyerDto),
    Officer(OfficerDto),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmerDto {
    pub farmer_id: String,
    pub full_name: String,
    pub sex: Option<String>,
    pub age: Option<i32>,
    pub contact_number: Option<String>,
    pub address: Option<String>,
    pub barangay: Option<String>,
    pub municipality: Option<String>,
    pub association_name: Option<String>,
    pub farm_location: Option<String>,
    pub farm_coordinates: Option<String>,
    pub farm_area_hectares: Option<f64>,
    pub years_in_farming: Option<i32>,
    pub type_of_abaca_planted: Option<String>,
    pub average_harvest_volume_kg: Option<f64>,
    pub harvest_frequency_weeks: Option<i32>,
    pub selling_price_range_min: Option<f64>,
    pub selling_price_range_max: Option<f64>,
    pub regular_buyer: Option<String>,
    pub income_per_cycle: Option<f64>,
    pub email: String,
    pub profile_photo: Option<String>,
    pub valid_id_photo: Option<String>,
    pub remarks: Option<String>,
    pub verification_status: String,
    pub verified_by: Option<String>,
    pub verified_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    pub is_active: bool,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl From<farmer::Model> for FarmerDto {
    fn from(m: farmer::Model) -> Self {
        Self {
            farmer_id: m.farmer_id,
            full_name: m.full_name,
            sex: m.sex,
            age: m.age,
            contact_number: m.contact_number,
            address: m.address,
            barangay: m.barangay,
            municipality: m.municipality,
            association_name: m.association_name,
            farm_location: m.farm_location,
            farm_coordinates: m.farm_coordinates,
            farm_area_hectares: m.farm_area_hectares,
            years_in_farming: m.years_in_farming,
            type_of_abaca_planted: m.type_of_abaca_planted,
            average_harvest_volume_kg: m.average_harvest_volume_kg,
            harvest_frequency_weeks: m.harvest_frequency_weeks,
            selling_price_range_min: m.selling_price_range_min,
            selling_price_range_max: m.selling_price_range_max,
            regular_buyer: m.regular_buyer,
            income_per_cycle: m.income_per_cycle,
            email: m.email,
            profile_photo: m.profile_photo,
            valid_id_photo: m.valid_id_photo,
            remarks: m.remarks,
            verification_status: m.verification_status,
            verified_by: m.verified_by,
            verified_at: m.verified_at,
            rejection_reason: m.rejection_reason,
            is_active: m.is_active,
            is_verified: m.is_verified,
            created_at: m.created_at,
            updated_at: m.updated_at,
            last_login: m.last_login,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyerDto {
    pub buyer_id: String,
    pub business_name: String,
    pub owner_name: String,
    pub business_address: Option<String>,
    pub contact_number: Option<String>,
    pub email: String,
    pub license_or_accreditation: Option<String>,
    pub buying_schedule: Option<String>,
    pub buying_location: Option<String>,
    pub warehouse_address: Option<String>,
    pub accepted_quality_grades: Option<Vec<String>>,
    pub price_range_min: Option<f64>,
    pub price_range_max: Option<f64>,
    pub payment_terms: Option<String>,
    pub partnered_associations: Option<Vec<String>>,
    pub profile_photo: Option<String>,
    pub valid_id_photo: Option<String>,
    pub business_permit_photo: Option<String>,
    pub remarks: Option<String>,
    pub verification_status: String,
    pub verified_by: Option<String>,
    pub verified_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    pub is_active: bool,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

fn string_list(value: Option<serde_json::Value>) -> Option<Vec<String>> {
    value.and_then(|v| serde_json::from_value(v).ok())
}

impl From<buyer::Model> for BuyerDto {
    fn from(m: buyer::Model) -> Self {
        Self {
            buyer_id: m.buyer_id,
            business_name: m.business_name,
            owner_name: m.owner_name,
            business_address: m.business_address,
            contact_number: m.contact_number,
            email: m.email,
            license_or_accreditation: m.license_or_accreditation,
            buying_schedule: m.buying_schedule,
            buying_location: m.buying_location,
            warehouse_address: m.warehouse_address,
            accepted_quality_grades: string_list(m.accepted_quality_grades),
            price_range_min: m.price_range_min,
            price_range_max: m.price_range_max,
            payment_terms: m.payment_terms,
            partnered_associations: string_list(m.partnered_associations),
            profile_photo: m.profile_photo,
            valid_id_photo: m.valid_id_photo,
            business_permit_photo: m.business_permit_photo,
            remarks: m.remarks,
            verification_status: m.verification_status,
            verified_by: m.verified_by,
            verified_at: m.verified_at,
            rejection_reason: m.rejection_reason,
            is_active: m.is_active,
            is_verified: m.is_verified,
            created_at: m.created_at,
            updated_at: m.updated_at,
            last_login: m.last_login,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfficerDto {
    pub officer_id: String,
    pub full_name: String,
    pub email: String,
    pub position: Option<String>,
    pub association_name: Option<String>,
    pub contact_number: Option<String>,
    pub address: Option<String>,
    pub term_start_date: Option<String>,
    pub term_end_date: Option<String>,
    pub term_duration: Option<String>,
    pub farmers_under_supervision: Option<i32>,
    pub profile_picture: Option<String>,
    pub valid_id_photo: Option<String>,
    pub remarks: Option<String>,
    pub is_super_admin: bool,
    pub profile_completed: bool,
    pub verification_status: String,
    pub verified_by: Option<String>,
    pub verified_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    pub is_active: bool,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl From<officer::Model> for OfficerDto {
    fn from(m: officer::Model) -> Self {
        Self {
            officer_id: m.officer_id,
            full_name: m.full_name,
            email: m.email,
            position: m.position,
            association_name: m.association_name,
            contact_number: m.contact_number,
            address: m.address,
            term_start_date: m.term_start_date,
            term_end_date: m.term_end_date,
            term_duration: m.term_duration,
            farmers_under_supervision: m.farmers_under_supervision,
            profile_picture: m.profile_picture,
            valid_id_photo: m.valid_id_photo,
            remarks: m.remarks,
            is_super_admin: m.is_super_admin,
            profile_completed: m.profile_completed,
            verification_status: m.verification_status,
            verified_by: m.verified_by,
            verified_at: m.verified_at,
            rejection_reason: m.rejection_reason,
            is_active: m.is_active,
            is_verified: m.is_verified,
            created_at: m.created_at,
            updated_at: m.updated_at,
            last_login: m.last_login,
        }
    }
}

/// Row shape for the management list views.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(rename = "type")]
    pub user_type: UserType,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub association: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub municipality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// List-view status derived from the two account flags.
fn derived_status(is_verified: bool, is_active: bool) -> &'static str {
    if is_verified {
        "verified"
    } else if is_active {
        "pending"
    } else {
        "rejected"
    }
}

impl From<farmer::Model> for UserSummary {
    fn from(m: farmer::Model) -> Self {
        Self {
            id: m.farmer_id,
            name: m.full_name,
            email: m.email,
            user_type: UserType::Farmer,
            status: derived_status(m.is_verified, m.is_active).to_string(),
            association: m.association_name,
            municipality: m.municipality,
            business_name: None,
            position: None,
            contact_number: m.contact_number,
            created_at: m.created_at,
        }
    }
}

impl From<buyer::Model> for UserSummary {
    fn from(m: buyer::Model) -> Self {
        Self {
            id: m.buyer_id,
            name: m.owner_name,
            email: m.email,
            user_type: UserType::Buyer,
            status: derived_status(m.is_verified, m.is_active).to_string(),
            association: None,
            municipality: None,
            business_name: Some(m.business_name),
            position: None,
            contact_number: m.contact_number,
            created_at: m.created_at,
        }
    }
}

impl From<officer::Model> for UserSummary {
    fn from(m: officer::Model) -> Self {
        Self {
            id: m.officer_id,
            name: m.full_name,
            email: m.email,
            user_type: UserType::Officer,
            // Officers keep the stored tri-state directly.
            status: m.verification_status,
            association: m.association_name,
            municipality: None,
            business_name: None,
            position: m.position,
            contact_number: m.contact_number,
            created_at: m.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_farmer() -> farmer::Model {
        farmer::Model {
            farmer_id: "f-1".into(),
            full_name: "Juan dela Cruz".into(),
            sex: None,
            age: None,
            contact_number: None,
            address: None,
            barangay: None,
            municipality: Some("Culiram".into()),
            association_name: None,
            farm_location: None,
            farm_coordinates: None,
            farm_area_hectares: None,
            years_in_farming: None,
            type_of_abaca_planted: None,
            average_harvest_volume_kg: None,
            harvest_frequency_weeks: None,
            selling_price_range_min: None,
            selling_price_range_max: None,
            regular_buyer: None,
            income_per_cycle: None,
            email: "juan@example.com".into(),
            password_hash: "$2b$10$secret".into(),
            profile_photo: None,
            valid_id_photo: None,
            remarks: None,
            verification_status: "pending".into(),
            verified_by: None,
            verified_at: None,
            rejection_reason: None,
            is_active: true,
            is_verified: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            last_login: None,
        }
    }

    #[test]
    fn farmer_dto_never_exposes_password_hash() {
        let dto = FarmerDto::from(sample_farmer());
        let json = serde_json::to_string(&dto).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("$2b$10$secret"));
        assert!(json.contains("\"farmerId\":\"f-1\""));
    }

    #[test]
    fn summary_status_derivation() {
        let mut m = sample_farmer();
        assert_eq!(UserSummary::from(m.clone()).status, "pending");
        m.is_verified = true;
        assert_eq!(UserSummary::from(m.clone()).status, "verified");
        m.is_verified = false;
        m.is_active = false;
        assert_eq!(UserSummary::from(m).status, "rejected");
    }
}
