//! Authentication service.
//!
//! Password hashing (bcrypt), JWT issuance and verification, and the
//! registration/login/refresh/logout flows for the three account types.
//! Every auth event is appended to `auth_audit_log`; audit failures are
//! logged and swallowed.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::config::Config;
use crate::db::entities::{
    auth_audit_log, buyer, farmer, officer, refresh_token, system_setting,
};
use crate::error::{Result, ServerError};

use super::types::{
    AuthTokens, BuyerDto, BuyerRegistration, FarmerDto, FarmerRegistration, LoginRequest,
    LoginResponse, OfficerDto, OfficerRegistration, PublicUser, UserType,
};

/// Claims embedded in both access and refresh tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id (`farmer_id` / `buyer_id` / `officer_id`).
    pub sub: String,
    pub user_type: UserType,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_super_admin: Option<bool>,
    pub iat: i64,
    pub exp: i64,
}

/// Request metadata recorded in the audit log.
#[derive(Debug, Clone, Default)]
pub struct ClientInfo {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Clone)]
pub struct AuthService {
    db: DatabaseConnection,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(db: DatabaseConnection, config: &Config) -> Self {
        Self {
            db,
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_ttl: Duration::minutes(config.access_token_ttl_minutes),
            refresh_ttl: Duration::days(config.refresh_token_ttl_days),
            bcrypt_cost: config.bcrypt_cost,
        }
    }

    // ========================================================================
    // Passwords and tokens
    // ========================================================================

    /// bcrypt is CPU-bound; run it off the async runtime.
    async fn hash_password(&self, password: String) -> Result<String> {
        let cost = self.bcrypt_cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| ServerError::Internal(format!("hash task failed: {e}")))?
            .map_err(|e| ServerError::Internal(format!("bcrypt: {e}")))
    }

    async fn verify_password(&self, password: String, hash: String) -> Result<bool> {
        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| ServerError::Internal(format!("verify task failed: {e}")))?
            .map_err(|e| ServerError::Internal(format!("bcrypt: {e}")))
    }

    fn issue_tokens(
        &self,
        user_id: &str,
        user_type: UserType,
        email: &str,
        is_super_admin: Option<bool>,
    ) -> Result<AuthTokens> {
        let now = Utc::now();
        let claims = |ttl: Duration| Claims {
            sub: user_id.to_string(),
            user_type,
            email: email.to_string(),
            is_super_admin,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        let access_token = encode(&Header::default(), &claims(self.access_ttl), &self.encoding_key)
            .map_err(|e| ServerError::Internal(format!("jwt encode: {e}")))?;
        let refresh_token = encode(
            &Header::default(),
            &claims(self.refresh_ttl),
            &self.encoding_key,
        )
        .map_err(|e| ServerError::Internal(format!("jwt encode: {e}")))?;

        Ok(AuthTokens {
            access_token,
            refresh_token,
        })
    }

    /// Verify signature and expiry, returning the embedded claims.
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        decode::<Claims>(token, &self.decoding_key, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
            .map_err(|_| ServerError::InvalidToken)
    }

    /// SHA-256 hex digest; raw tokens are never persisted.
    fn hash_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        hasher
            .finalize()
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect()
    }

    // ========================================================================
    // Audit log
    // ========================================================================

    async fn log_auth_event(
        &self,
        user_id: Option<&str>,
        user_type: Option<UserType>,
        action: &str,
        success: bool,
        client: &ClientInfo,
        error_message: Option<&str>,
    ) {
        let entry = auth_audit_log::ActiveModel {
            log_id: Set(Uuid::new_v4().to_string()),
            user_id: Set(user_id.map(str::to_string)),
            user_type: Set(user_type.map(|t| t.as_str().to_string())),
            action: Set(action.to_string()),
            success: Set(success),
            ip_address: Set(client.ip_address.clone()),
            user_agent: Set(client.user_agent.clone()),
            error_message: Set(error_message.map(str::to_string)),
            created_at: Set(Utc::now()),
        };
        if let Err(e) = entry.insert(&self.db).await {
            tracing::warn!("Failed to write auth audit log: {}", e);
        }
    }

    // ========================================================================
    // Registration
    // ========================================================================

    pub async fn register_farmer(
        &self,
        data: FarmerRegistration,
        client: &ClientInfo,
    ) -> Result<FarmerDto> {
        let existing = farmer::Entity::find()
            .filter(farmer::Column::Email.eq(&data.email))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            self.log_auth_event(
                None,
                Some(UserType::Farmer),
                "register",
                false,
                client,
                Some("Email already exists"),
            )
            .await;
            return Err(ServerError::DuplicateEmail);
        }

        let password_hash = self.hash_password(data.password).await?;
        let now = Utc::now();

        let record = farmer::ActiveModel {
            farmer_id: Set(Uuid::new_v4().to_string()),
            full_name: Set(data.full_name),
            sex: Set(data.sex),
            age: Set(data.age),
            contact_number: Set(data.contact_number),
            address: Set(data.address),
            barangay: Set(data.barangay),
            municipality: Set(data.municipality),
            association_name: Set(data.association_name),
            farm_location: Set(data.farm_location),
            farm_coordinates: Set(data.farm_coordinates),
            farm_area_hectares: Set(data.farm_area_hectares),
            years_in_farming: Set(data.years_in_farming),
            type_of_abaca_planted: Set(data.type_of_abaca_planted),
            average_harvest_volume_kg: Set(data.average_harvest_volume_kg),
            harvest_frequency_weeks: Set(data.harvest_frequency_weeks),
            selling_price_range_min: Set(data.selling_price_range_min),
            selling_price_range_max: Set(data.selling_price_range_max),
            regular_buyer: Set(data.regular_buyer),
            income_per_cycle: Set(data.income_per_cycle),
            email: Set(data.email),
            password_hash: Set(password_hash),
            profile_photo: Set(data.profile_photo),
            valid_id_photo: Set(data.valid_id_photo),
            remarks: Set(data.remarks),
            verification_status: Set("pending".to_string()),
            verified_by: Set(None),
            verified_at: Set(None),
            rejection_reason: Set(None),
            is_active: Set(true),
            is_verified: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            last_login: Set(None),
        }
        .insert(&self.db)
        .await?;

        self.log_auth_event(
            Some(&record.farmer_id),
            Some(UserType::Farmer),
            "register",
            true,
            client,
            None,
        )
        .await;

        Ok(FarmerDto::from(record))
    }

    pub async fn register_buyer(
        &self,
        data: BuyerRegistration,
        client: &ClientInfo,
    ) -> Result<BuyerDto> {
        let existing = buyer::Entity::find()
            .filter(buyer::Column::Email.eq(&data.email))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            self.log_auth_event(
                None,
                Some(UserType::Buyer),
                "register",
                false,
                client,
                Some("Email already exists"),
            )
            .await;
            return Err(ServerError::DuplicateEmail);
        }

        let password_hash = self.hash_password(data.password).await?;
        let now = Utc::now();

        let record = buyer::ActiveModel {
            buyer_id: Set(Uuid::new_v4().to_string()),
            business_name: Set(data.business_name),
            owner_name: Set(data.owner_name),
            business_address: Set(data.business_address),
            contact_number: Set(data.contact_number),
            email: Set(data.email),
            password_hash: Set(password_hash),
            license_or_accreditation: Set(data.license_or_accreditation),
            buying_schedule: Set(data.buying_schedule),
            buying_location: Set(data.buying_location),
            warehouse_address: Set(data.warehouse_address),
            accepted_quality_grades: Set(data
                .accepted_quality_grades
                .map(|v| serde_json::json!(v))),
            price_range_min: Set(data.price_range_min),
            price_range_max: Set(data.price_range_max),
            payment_terms: Set(data.payment_terms),
            partnered_associations: Set(data.partnered_associations.map(|v| serde_json::json!(v))),
            profile_photo: Set(data.profile_photo),
            valid_id_photo: Set(data.valid_id_photo),
            business_permit_photo: Set(data.business_permit_photo),
            remarks: Set(data.remarks),
            verification_status: Set("pending".to_string()),
            verified_by: Set(None),
            verified_at: Set(None),
            rejection_reason: Set(None),
            is_active: Set(true),
            is_verified: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            last_login: Set(None),
        }
        .insert(&self.db)
        .await?;

        self.log_auth_event(
            Some(&record.buyer_id),
            Some(UserType::Buyer),
            "register",
            true,
            client,
            None,
        )
        .await;

        Ok(BuyerDto::from(record))
    }

    /// Officer accounts come in three flavors: public self-registration
    /// (position + association supplied, lands pending), admin-created
    /// (basic fields only, verified immediately, profile completed on
    /// first login), and super-admin (verified, profile marked complete).
    pub async fn register_officer(
        &self,
        data: OfficerRegistration,
        client: &ClientInfo,
    ) -> Result<OfficerDto> {
        let existing = officer::Entity::find()
            .filter(officer::Column::Email.eq(&data.email))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            self.log_auth_event(
                None,
                Some(UserType::Officer),
                "register",
                false,
                client,
                Some("Email already exists"),
            )
            .await;
            return Err(ServerError::DuplicateEmail);
        }

        let password_hash = self.hash_password(data.password).await?;
        let now = Utc::now();

        let is_super_admin = data.is_super_admin;
        let is_public_registration = data.position.is_some() && data.association_name.is_some();

        let position = data.position.or_else(|| {
            is_super_admin.then(|| "System Administrator".to_string())
        });
        let association_name = data
            .association_name
            .or_else(|| is_super_admin.then(|| "MAO Culiram".to_string()));

        let record = officer::ActiveModel {
            officer_id: Set(Uuid::new_v4().to_string()),
            full_name: Set(data.full_name),
            email: Set(data.email),
            password_hash: Set(password_hash),
            position: Set(position),
            association_name: Set(association_name),
            contact_number: Set(data.contact_number),
            address: Set(data.address),
            term_start_date: Set(None),
            term_end_date: Set(None),
            term_duration: Set(data.term_duration),
            farmers_under_supervision: Set(None),
            profile_picture: Set(data.profile_picture),
            valid_id_photo: Set(data.valid_id_photo),
            remarks: Set(data.remarks),
            is_super_admin: Set(is_super_admin),
            profile_completed: Set(is_super_admin || is_public_registration),
            verification_status: Set(if is_public_registration && !is_super_admin {
                "pending".to_string()
            } else {
                "verified".to_string()
            }),
            verified_by: Set(None),
            verified_at: Set(None),
            rejection_reason: Set(None),
            is_active: Set(true),
            is_verified: Set(!(is_public_registration && !is_super_admin)),
            created_at: Set(now),
            updated_at: Set(now),
            last_login: Set(None),
        }
        .insert(&self.db)
        .await?;

        self.log_auth_event(
            Some(&record.officer_id),
            Some(UserType::Officer),
            "register",
            true,
            client,
            None,
        )
        .await;

        Ok(OfficerDto::from(record))
    }

    // ========================================================================
    // Login
    // ========================================================================

    /// Gate order is part of the external contract: active and verified
    /// checks run before the password is ever compared, and unverified
    /// accounts get a status-specific message.
    pub async fn login(&self, req: LoginRequest, client: &ClientInfo) -> Result<LoginResponse> {
        if req.user_type != UserType::Officer && self.maintenance_enabled().await? {
            return Err(ServerError::Maintenance);
        }

        let account = match self.find_account(req.user_type, &req.email).await? {
            Some(a) => a,
            None => {
                self.log_auth_event(
                    None,
                    Some(req.user_type),
                    "login",
                    false,
                    client,
                    Some("User not found"),
                )
                .await;
                return Err(ServerError::InvalidCredentials);
            }
        };
        let user_id = account.id().to_string();

        if !account.is_active() {
            self.log_auth_event(
                Some(&user_id),
                Some(req.user_type),
                "login",
                false,
                client,
                Some("Account is inactive"),
            )
            .await;
            return Err(ServerError::AccountInactive);
        }

        if !account.is_verified() {
            self.log_auth_event(
                Some(&user_id),
                Some(req.user_type),
                "login",
                false,
                client,
                Some("Account not verified"),
            )
            .await;
            let message = if account.verification_status() == "rejected" {
                let reason = account
                    .rejection_reason()
                    .unwrap_or("Your application did not meet our requirements.");
                format!(
                    "Your account application was rejected. Reason: {}\n\n\
                     Please contact support@mao.gov.ph for assistance.",
                    reason
                )
            } else {
                "Your account is pending verification. Please wait for our team to \
                 review your application. We will contact you via email or phone once \
                 verified. This usually takes 1-3 business days."
                    .to_string()
            };
            return Err(ServerError::AccountUnverified(message));
        }

        let password_ok = self
            .verify_password(req.password, account.password_hash().to_string())
            .await?;
        if !password_ok {
            self.log_auth_event(
                Some(&user_id),
                Some(req.user_type),
                "login",
                false,
                client,
                Some("Invalid password"),
            )
            .await;
            return Err(ServerError::InvalidCredentials);
        }

        let tokens = self.issue_tokens(
            &user_id,
            req.user_type,
            account.email(),
            account.super_admin_flag(),
        )?;

        let now = Utc::now();
        refresh_token::ActiveModel {
            token_id: Set(Uuid::new_v4().to_string()),
            user_id: Set(user_id.clone()),
            user_type: Set(req.user_type.as_str().to_string()),
            token_hash: Set(Self::hash_token(&tokens.refresh_token)),
            expires_at: Set(now + self.refresh_ttl),
            revoked: Set(false),
            created_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        account.touch_last_login(&self.db, now).await?;

        self.log_auth_event(Some(&user_id), Some(req.user_type), "login", true, client, None)
            .await;

        Ok(LoginResponse {
            user: account.into_public(),
            tokens,
        })
    }

    async fn find_account(&self, user_type: UserType, email: &str) -> Result<Option<Account>> {
        Ok(match user_type {
            UserType::Farmer => farmer::Entity::find()
                .filter(farmer::Column::Email.eq(email))
                .one(&self.db)
                .await?
                .map(Account::Farmer),
            UserType::Buyer => buyer::Entity::find()
                .filter(buyer::Column::Email.eq(email))
                .one(&self.db)
                .await?
                .map(Account::Buyer),
            UserType::Officer => officer::Entity::find()
                .filter(officer::Column::Email.eq(email))
                .one(&self.db)
                .await?
                .map(Account::Officer),
        })
    }

    // ========================================================================
    // Refresh and logout
    // ========================================================================

    /// Rotate the refresh token: verify the JWT, confirm a live row for
    /// (user, type), then overwrite that row with the new hash and expiry.
    /// Latest token wins; there is no per-device tracking.
    pub async fn refresh(&self, presented: &str) -> Result<AuthTokens> {
        let claims = self.verify_token(presented)?;

        let now = Utc::now();
        let row = refresh_token::Entity::find()
            .filter(refresh_token::Column::UserId.eq(&claims.sub))
            .filter(refresh_token::Column::UserType.eq(claims.user_type.as_str()))
            .filter(refresh_token::Column::Revoked.eq(false))
            .filter(refresh_token::Column::ExpiresAt.gt(now))
            .order_by_desc(refresh_token::Column::CreatedAt)
            .one(&self.db)
            .await?
            .ok_or(ServerError::InvalidToken)?;

        let tokens = self.issue_tokens(
            &claims.sub,
            claims.user_type,
            &claims.email,
            claims.is_super_admin,
        )?;

        let mut active = row.into_active_model();
        active.token_hash = Set(Self::hash_token(&tokens.refresh_token));
        active.expires_at = Set(now + self.refresh_ttl);
        active.update(&self.db).await?;

        Ok(tokens)
    }

    /// Revoke every refresh token for the user (rows are kept, not deleted).
    pub async fn logout(&self, user_id: &str, user_type: UserType, client: &ClientInfo) -> Result<()> {
        refresh_token::Entity::update_many()
            .col_expr(refresh_token::Column::Revoked, Expr::value(true))
            .filter(refresh_token::Column::UserId.eq(user_id))
            .filter(refresh_token::Column::UserType.eq(user_type.as_str()))
            .exec(&self.db)
            .await?;

        self.log_auth_event(Some(user_id), Some(user_type), "logout", true, client, None)
            .await;

        Ok(())
    }

    // ========================================================================
    // Maintenance flag and bootstrap
    // ========================================================================

    pub async fn maintenance_enabled(&self) -> Result<bool> {
        let setting = system_setting::Entity::find_by_id(system_setting::MAINTENANCE_MODE)
            .one(&self.db)
            .await?;
        Ok(setting.map(|s| s.value == "true").unwrap_or(false))
    }

    /// Seed a verified super-admin officer if none exists for the email.
    pub async fn ensure_super_admin(&self, email: &str, password: &str) -> Result<()> {
        let existing = officer::Entity::find()
            .filter(officer::Column::Email.eq(email))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Ok(());
        }

        self.register_officer(
            OfficerRegistration {
                full_name: "System Administrator".to_string(),
                email: email.to_string(),
                password: password.to_string(),
                profile_picture: None,
                valid_id_photo: None,
                is_super_admin: true,
                position: None,
                association_name: None,
                contact_number: None,
                address: None,
                term_duration: None,
                remarks: None,
            },
            &ClientInfo::default(),
        )
        .await?;
        tracing::info!("Seeded super-admin officer account for {}", email);
        Ok(())
    }
}

/// The three account tables share the login gates but not a table; this
/// wrapper gives the login flow one view over whichever row matched.
enum Account {
    Farmer(farmer::Model),
    Buyer(buyer::Model),
    Officer(officer::Model),
}

impl Account {
    fn id(&self) -> &str {
        match self {
            Account::Farmer(m) => &m.farmer_id,
            Account::Buyer(m) => &m.buyer_id,
            Account::Officer(m) => &m.officer_id,
        }
    }

    fn email(&self) -> &str {
        match self {
            Account::Farmer(m) => &m.email,
            Account::Buyer(m) => &m.email,
            Account::Officer(m) => &m.email,
        }
    }

    fn password_hash(&self) -> &str {
        match self {
            Account::Farmer(m) => &m.password_hash,
            Account::Buyer(m) => &m.password_hash,
            Account::Officer(m) => &m.password_hash,
        }
    }

    fn is_active(&self) -> bool {
        match self {
            Account::Farmer(m) => m.is_active,
            Account::Buyer(m) => m.is_active,
            Account::Officer(m) => m.is_active,
        }
    }

    fn is_verified(&self) -> bool {
        match self {
            Account::Farmer(m) => m.is_verified,
            Account::Buyer(m) => m.is_verified,
            Account::Officer(m) => m.is_verified,
        }
    }

    fn verification_status(&self) -> &str {
        match self {
            Account::Farmer(m) => &m.verification_status,
            Account::Buyer(m) => &m.verification_status,
            Account::Officer(m) => &m.verification_status,
        }
    }

    fn rejection_reason(&self) -> Option<&str> {
        match self {
            Account::Farmer(m) => m.rejection_reason.as_deref(),
            Account::Buyer(m) => m.rejection_reason.as_deref(),
            Account::Officer(m) => m.rejection_reason.as_deref(),
        }
    }

    /// Only officer tokens carry the super-admin flag.
    fn super_admin_flag(&self) -> Option<bool> {
        match self {
            Account::Officer(m) => Some(m.is_super_admin),
            _ => None,
        }
    }

    async fn touch_last_login(
        &self,
        db: &DatabaseConnection,
        now: chrono::DateTime<Utc>,
    ) -> Result<()> {
        match self {
            Account::Farmer(m) => {
                let mut active = m.clone().into_active_model();
                active.last_login = Set(Some(now));
                active.update(db).await?;
            }
            Account::Buyer(m) => {
                let mut active = m.clone().into_active_model();
                active.last_login = Set(Some(now));
                active.update(db).await?;
            }
            Account::Officer(m) => {
                let mut active = m.clone().into_active_model();
                active.last_login = Set(Some(now));
                active.update(db).await?;
            }
        }
        Ok(())
    }

    fn into_public(self) -> PublicUser {
        match self {
            Account::Farmer(m) => PublicUser::Farmer(FarmerDto::from(m)),
            Account::Buyer(m) => PublicUser::Buyer(BuyerDto::from(m)),
            Account::Officer(m) => PublicUser::Officer(OfficerDto::from(m)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    async fn test_service() -> AuthService {
        let database = db::init_database("sqlite::memory:")
            .await
            .expect("in-memory database");
        let config = Config {
            port: 0,
            database_url: String::new(),
            jwt_secret: "test-secret".to_string(),
            access_token_ttl_minutes: 60,
            refresh_token_ttl_days: 7,
            // Minimum bcrypt cost; keeps the suite fast.
            bcrypt_cost: 4,
            admin_email: None,
            admin_password: None,
        };
        AuthService::new(database, &config)
    }

    fn farmer_registration(email: &str) -> FarmerRegistration {
        FarmerRegistration {
            full_name: "Juan dela Cruz".to_string(),
            sex: None,
            age: Some(40),
            contact_number: None,
            address: None,
            barangay: None,
            municipality: Some("Culiram".to_string()),
            association_name: None,
            farm_location: None,
            farm_coordinates: None,
            farm_area_hectares: Some(1.5),
            years_in_farming: Some(10),
            type_of_abaca_planted: None,
            average_harvest_volume_kg: None,
            harvest_frequency_weeks: None,
            selling_price_range_min: None,
            selling_price_range_max: None,
            regular_buyer: None,
            income_per_cycle: None,
            email: email.to_string(),
            password: "hunter2!".to_string(),
            profile_photo: None,
            valid_id_photo: None,
            remarks: None,
        }
    }

    fn login_request(email: &str, password: &str, user_type: UserType) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
            user_type,
        }
    }

    async fn mark_farmer_verified(auth: &AuthService, farmer_id: &str) {
        let model = farmer::Entity::find_by_id(farmer_id)
            .one(&auth.db)
            .await
            .unwrap()
            .unwrap();
        let mut active = model.into_active_model();
        active.is_verified = Set(true);
        active.is_active = Set(true);
        active.verification_status = Set("verified".to_string());
        active.update(&auth.db).await.unwrap();
    }

    #[tokio::test]
    async fn password_hash_roundtrip() {
        let auth = test_service().await;
        let hash = auth.hash_password("secret123".to_string()).await.unwrap();
        assert_ne!(hash, "secret123");
        assert!(auth
            .verify_password("secret123".to_string(), hash.clone())
            .await
            .unwrap());
        assert!(!auth
            .verify_password("wrong".to_string(), hash)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn token_roundtrip() {
        let auth = test_service().await;
        let tokens = auth
            .issue_tokens("user-1", UserType::Officer, "o@example.com", Some(true))
            .unwrap();
        let claims = auth.verify_token(&tokens.access_token).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.user_type, UserType::Officer);
        assert_eq!(claims.is_super_admin, Some(true));
        assert!(auth.verify_token("not-a-jwt").is_err());
    }

    #[tokio::test]
    async fn duplicate_email_rejected_before_insert() {
        let auth = test_service().await;
        let client = ClientInfo::default();
        auth.register_farmer(farmer_registration("dup@example.com"), &client)
            .await
            .unwrap();

        let err = auth
            .register_farmer(farmer_registration("dup@example.com"), &client)
            .await
            .unwrap_err();
        assert!(matches!(err, ServerError::DuplicateEmail));

        let count = farmer::Entity::find()
            .filter(farmer::Column::Email.eq("dup@example.com"))
            .all(&auth.db)
            .await
            .unwrap()
            .len();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn unverified_login_gated_before_password_check() {
        let auth = test_service().await;
        let client = ClientInfo::default();
        let farmer = auth
            .register_farmer(farmer_registration("pending@example.com"), &client)
            .await
            .unwrap();

        // Wrong password, but the pending gate fires first.
        let err = auth
            .login(
                login_request("pending@example.com", "totally-wrong", UserType::Farmer),
                &client,
            )
            .await
            .unwrap_err();
        match err {
            ServerError::AccountUnverified(msg) => {
                assert!(msg.contains("pending verification"))
            }
            other => panic!("expected unverified error, got {:?}", other),
        }

        // Reject the application and try again: the message must carry the reason.
        let model = farmer::Entity::find_by_id(&farmer.farmer_id)
            .one(&auth.db)
            .await
            .unwrap()
            .unwrap();
        let mut active = model.into_active_model();
        active.verification_status = Set("rejected".to_string());
        active.rejection_reason = Set(Some("Incomplete documents".to_string()));
        active.update(&auth.db).await.unwrap();

        let err = auth
            .login(
                login_request("pending@example.com", "hunter2!", UserType::Farmer),
                &client,
            )
            .await
            .unwrap_err();
        match err {
            ServerError::AccountUnverified(msg) => {
                assert!(msg.contains("rejected"));
                assert!(msg.contains("Incomplete documents"));
            }
            other => panic!("expected unverified error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn wrong_password_is_uniform_and_leaves_no_trace() {
        let auth = test_service().await;
        let client = ClientInfo::default();
        let farmer = auth
            .register_farmer(farmer_registration("verified@example.com"), &client)
            .await
            .unwrap();
        mark_farmer_verified(&auth, &farmer.farmer_id).await;

        let wrong_password = auth
            .login(
                login_request("verified@example.com", "wrong", UserType::Farmer),
                &client,
            )
            .await
            .unwrap_err();
        let unknown_email = auth
            .login(
                login_request("nobody@example.com", "wrong", UserType::Farmer),
                &client,
            )
            .await
            .unwrap_err();
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());

        // No last_login update and no refresh token issued.
        let model = farmer::Entity::find_by_id(&farmer.farmer_id)
            .one(&auth.db)
            .await
            .unwrap()
            .unwrap();
        assert!(model.last_login.is_none());
        let tokens = refresh_token::Entity::find()
            .filter(refresh_token::Column::UserId.eq(&farmer.farmer_id))
            .all(&auth.db)
            .await
            .unwrap();
        assert!(tokens.is_empty());
    }

    #[tokio::test]
    async fn register_verify_login_end_to_end() {
        let auth = test_service().await;
        let client = ClientInfo::default();
        let farmer = auth
            .register_farmer(farmer_registration("e2e@example.com"), &client)
            .await
            .unwrap();
        assert_eq!(farmer.verification_status, "pending");
        assert!(!farmer.is_verified);

        mark_farmer_verified(&auth, &farmer.farmer_id).await;

        let response = auth
            .login(
                login_request("e2e@example.com", "hunter2!", UserType::Farmer),
                &client,
            )
            .await
            .unwrap();
        assert!(!response.tokens.access_token.is_empty());
        assert!(!response.tokens.refresh_token.is_empty());

        let model = farmer::Entity::find_by_id(&farmer.farmer_id)
            .one(&auth.db)
            .await
            .unwrap()
            .unwrap();
        assert!(model.last_login.is_some());

        // Success is audit-logged.
        let audits = auth_audit_log::Entity::find()
            .filter(auth_audit_log::Column::UserId.eq(&farmer.farmer_id))
            .filter(auth_audit_log::Column::Action.eq("login"))
            .filter(auth_audit_log::Column::Success.eq(true))
            .all(&auth.db)
            .await
            .unwrap();
        assert_eq!(audits.len(), 1);
    }

    #[tokio::test]
    async fn revoked_refresh_token_never_yields_tokens() {
        let auth = test_service().await;
        let client = ClientInfo::default();
        let farmer = auth
            .register_farmer(farmer_registration("revoke@example.com"), &client)
            .await
            .unwrap();
        mark_farmer_verified(&auth, &farmer.farmer_id).await;

        let response = auth
            .login(
                login_request("revoke@example.com", "hunter2!", UserType::Farmer),
                &client,
            )
            .await
            .unwrap();

        auth.logout(&farmer.farmer_id, UserType::Farmer, &client)
            .await
            .unwrap();

        // Cryptographically valid, but every row is revoked.
        let err = auth.refresh(&response.tokens.refresh_token).await.unwrap_err();
        assert!(matches!(err, ServerError::InvalidToken));

        // Rows were revoked, not deleted.
        let rows = refresh_token::Entity::find()
            .filter(refresh_token::Column::UserId.eq(&farmer.farmer_id))
            .all(&auth.db)
            .await
            .unwrap();
        assert!(!rows.is_empty());
        assert!(rows.iter().all(|r| r.revoked));
    }

    #[tokio::test]
    async fn refresh_rotates_stored_hash() {
        let auth = test_service().await;
        let client = ClientInfo::default();
        let farmer = auth
            .register_farmer(farmer_registration("rotate@example.com"), &client)
            .await
            .unwrap();
        mark_farmer_verified(&auth, &farmer.farmer_id).await;

        let response = auth
            .login(
                login_request("rotate@example.com", "hunter2!", UserType::Farmer),
                &client,
            )
            .await
            .unwrap();

        let before = refresh_token::Entity::find()
            .filter(refresh_token::Column::UserId.eq(&farmer.farmer_id))
            .one(&auth.db)
            .await
            .unwrap()
            .unwrap();

        let rotated = auth.refresh(&response.tokens.refresh_token).await.unwrap();

        let after = refresh_token::Entity::find_by_id(&before.token_id)
            .one(&auth.db)
            .await
            .unwrap()
            .unwrap();
        assert_ne!(before.token_hash, after.token_hash);
        assert_eq!(after.token_hash, AuthService::hash_token(&rotated.refresh_token));

        // The rotated token itself refreshes fine.
        auth.refresh(&rotated.refresh_token).await.unwrap();
    }

    #[tokio::test]
    async fn officer_registration_flavors() {
        let auth = test_service().await;
        let client = ClientInfo::default();

        // Admin-created: basic fields only, verified immediately.
        let admin_created = auth
            .register_officer(
                OfficerRegistration {
                    full_name: "Ana Santos".to_string(),
                    email: "ana@example.com".to_string(),
                    password: "pw123456".to_string(),
                    profile_picture: None,
                    valid_id_photo: None,
                    is_super_admin: false,
                    position: None,
                    association_name: None,
                    contact_number: None,
                    address: None,
                    term_duration: None,
                    remarks: None,
                },
                &client,
            )
            .await
            .unwrap();
        assert!(admin_created.is_verified);
        assert_eq!(admin_created.verification_status, "verified");
        assert!(!admin_created.profile_completed);

        // Public registration: position + association present, lands pending.
        let public = auth
            .register_officer(
                OfficerRegistration {
                    full_name: "Ben Reyes".to_string(),
                    email: "ben@example.com".to_string(),
                    password: "pw123456".to_string(),
                    profile_picture: None,
                    valid_id_photo: None,
                    is_super_admin: false,
                    position: Some("Treasurer".to_string()),
                    association_name: Some("Upland Growers".to_string()),
                    contact_number: None,
                    address: None,
                    term_duration: None,
                    remarks: None,
                },
                &client,
            )
            .await
            .unwrap();
        assert!(!public.is_verified);
        assert_eq!(public.verification_status, "pending");
        assert!(public.profile_completed);

        // Super admin: verified, defaults filled in, profile complete.
        let admin = auth
            .register_officer(
                OfficerRegistration {
                    full_name: "Root".to_string(),
                    email: "root@example.com".to_string(),
                    password: "pw123456".to_string(),
                    profile_picture: None,
                    valid_id_photo: None,
                    is_super_admin: true,
                    position: None,
                    association_name: None,
                    contact_number: None,
                    address: None,
                    term_duration: None,
                    remarks: None,
                },
                &client,
            )
            .await
            .unwrap();
        assert!(admin.is_verified);
        assert!(admin.is_super_admin);
        assert!(admin.profile_completed);
        assert_eq!(admin.position.as_deref(), Some("System Administrator"));
    }

    #[tokio::test]
    async fn maintenance_mode_blocks_non_officers() {
        let auth = test_service().await;
        let client = ClientInfo::default();
        let farmer = auth
            .register_farmer(farmer_registration("maint@example.com"), &client)
            .await
            .unwrap();
        mark_farmer_verified(&auth, &farmer.farmer_id).await;

        system_setting::ActiveModel {
            key: Set(system_setting::MAINTENANCE_MODE.to_string()),
            value: Set("true".to_string()),
            updated_at: Set(Utc::now()),
        }
        .insert(&auth.db)
        .await
        .unwrap();

        let err = auth
            .login(
                login_request("maint@example.com", "hunter2!", UserType::Farmer),
                &client,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ServerError::Maintenance));

        // Officers still get through to the credential checks.
        let err = auth
            .login(
                login_request("ghost@example.com", "pw", UserType::Officer),
                &client,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ServerError::InvalidCredentials));
    }

    #[tokio::test]
    async fn ensure_super_admin_is_idempotent() {
        let auth = test_service().await;
        auth.ensure_super_admin("admin@mao.gov.ph", "changeme")
            .await
            .unwrap();
        auth.ensure_super_admin("admin@mao.gov.ph", "changeme")
            .await
            .unwrap();

        let admins = officer::Entity::find()
            .filter(officer::Column::Email.eq("admin@mao.gov.ph"))
            .all(&auth.db)
            .await
            .unwrap();
        assert_eq!(admins.len(), 1);
        assert!(admins[0].is_super_admin);
    }
}
