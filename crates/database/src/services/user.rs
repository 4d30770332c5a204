use crate::{
    entities::app_user,
    services::{
        ServiceError,
        password::{hash_password, verify_password},
    },
};
use models::{
    user::SignUp,
    validation::{ValidationError, check_email, check_username},
};
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set},
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder,
};

pub struct AppUserService;

impl AppUserService {
    /// Creates an active account
    ///
    /// Without a password the account gets an unusable one and can't sign in.
    pub async fn create_app_user(
        db: &DatabaseConnection,
        username: &str,
        email: &str,
        password: Option<&str>,
    ) -> Result<app_user::Model, ServiceError> {
        if username.is_empty() {
            return Err(ValidationError::Required { field: "username" }.into());
        }
        check_username(username)?;
        check_email("email", email)?;

        if Self::get_app_user(db, username).await?.is_some() {
            return Err(ServiceError::UsernameTaken(username.to_string()));
        }

        let password_hash = password.map(hash_password).transpose()?;

        let user = app_user::ActiveModel {
            id: NotSet,
            username: Set(username.to_string()),
            email: Set(email.to_string()),
            password_hash: Set(password_hash),
            is_active: Set(true),
            date_joined: Set(chrono::Utc::now().naive_utc()),
        }
        .insert(db)
        .await?;

        log::info!("Created user {} ({})", user.username, user.id);
        Ok(user)
    }

    pub async fn sign_up(
        db: &DatabaseConnection,
        form: SignUp,
    ) -> Result<app_user::Model, ServiceError> {
        form.validate()?;
        Self::create_app_user(db, &form.username, &form.email, Some(&form.password1)).await
    }

    /// Returns the user when the credentials match an active account with a usable password
    pub async fn authenticate<C: ConnectionTrait>(
        db: &C,
        username: &str,
        password: &str,
    ) -> Result<Option<app_user::Model>, DbErr> {
        let Some(user) = Self::get_app_user(db, username).await? else {
            return Ok(None);
        };
        if !user.is_active {
            log::debug!("Refusing sign-in of inactive user {username}");
            return Ok(None);
        }

        let verified = user
            .password_hash
            .as_deref()
            .is_some_and(|hash| verify_password(password, hash));

        Ok(verified.then_some(user))
    }

    /// Flips the active flag and returns the updated account
    pub async fn toggle_user_activation(
        db: &DatabaseConnection,
        user_id: i32,
    ) -> Result<app_user::Model, ServiceError> {
        let user = Self::get_app_user_by_id(db, user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id))?;

        let is_active = !user.is_active;
        let mut active = user.into_active_model();
        active.is_active = Set(is_active);

        let updated = active.update(db).await?;
        log::info!(
            "User {} is now {}",
            updated.username,
            if updated.is_active { "active" } else { "inactive" }
        );
        Ok(updated)
    }

    pub async fn get_all_app_users<C: ConnectionTrait>(
        db: &C,
    ) -> Result<Vec<app_user::Model>, DbErr> {
        app_user::Entity::find()
            .order_by_asc(app_user::Column::Id)
            .all(db)
            .await
    }

    pub async fn get_app_user<C: ConnectionTrait>(
        db: &C,
        username: &str,
    ) -> Result<Option<app_user::Model>, DbErr> {
        app_user::Entity::find()
            .filter(app_user::Column::Username.eq(username))
            .one(db)
            .await
    }

    pub async fn get_app_user_by_id<C: ConnectionTrait>(
        db: &C,
        user_id: i32,
    ) -> Result<Option<app_user::Model>, DbErr> {
        app_user::Entity::find_by_id(user_id).one(db).await
    }
}
