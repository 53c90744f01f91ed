use sqlx::PgPool;
use uuid::Uuid;

use crate::database::SortOrder;
use crate::database::models::subscription::Subscription;
use crate::database::models::user::{User, UserParticulars, UserUpdates};
use crate::database::models::view::View;
use crate::database::repositories::subscription::SubscriptionRepository;
use crate::database::repositories::user::UserRepository;
use crate::database::repositories::view::ViewRepository;
use crate::database::StoreError;
use crate::services::ServiceResult;

pub async fn create_new_user(pool: &PgPool, particulars: UserParticulars) -> ServiceResult<User> {
    tracing::debug!("Creating new user: {:?}", particulars);

    let entity = UserRepository::create(pool, &particulars).await?;
    Ok(User::from(entity))
}

pub async fn get_user_by_platform(
    pool: &PgPool,
    platform_type: &str,
    platform_id: &str,
) -> ServiceResult<Option<User>> {
    tracing::debug!("Getting user by platform: {} {}", platform_type, platform_id);

    let entity = UserRepository::find_by_platform(pool, platform_type, platform_id).await?;
    Ok(entity.map(User::from))
}

pub async fn get_user_by_id(pool: &PgPool, id: Uuid) -> ServiceResult<Option<User>> {
    tracing::debug!("Getting user by id: {}", id);

    let entity = UserRepository::find_by_id(pool, id).await?;
    Ok(entity.map(User::from))
}

pub async fn get_list_of_users(pool: &PgPool, order: SortOrder) -> ServiceResult<Vec<User>> {
    tracing::debug!("Getting list of users, order: {:?}", order);

    match UserRepository::list(pool, order).await {
        Ok(entities) => Ok(entities.into_iter().map(User::from).collect()),
        Err(e) => {
            tracing::error!("Unable to retrieve list of users: {}", e);
            Err(e.into())
        }
    }
}

pub async fn update_user(
    pool: &PgPool,
    user_id: Uuid,
    updates: UserUpdates,
) -> ServiceResult<User> {
    match UserRepository::update(pool, user_id, &updates).await {
        Ok(Some(entity)) => Ok(User::from(entity)),
        Ok(None) => {
            tracing::error!("Unable to update user particulars {}: user not found", user_id);
            Err(StoreError::UserNotFound)
        }
        Err(e) => {
            tracing::error!("Unable to update user particulars {}: {}", user_id, e);
            Err(e.into())
        }
    }
}

pub async fn get_number_of_users(pool: &PgPool) -> ServiceResult<i64> {
    Ok(UserRepository::count(pool).await?)
}

///// 观看相关 ////

pub async fn create_view(pool: &PgPool, user_id: Uuid, stream_id: Uuid) -> ServiceResult<View> {
    match ViewRepository::create(pool, user_id, stream_id).await {
        Ok(view) => Ok(view),
        Err(e) => {
            tracing::error!("Unable to create view: {}", e);
            Err(e)
        }
    }
}

/// 获取正在观看某直播的用户列表，每条记录都经过用户格式化投影
pub async fn get_list_of_users_viewing_stream(
    pool: &PgPool,
    stream_id: Uuid,
) -> ServiceResult<Vec<User>> {
    tracing::debug!("Getting list of users watching stream: {}", stream_id);

    match ViewRepository::list_viewers(pool, stream_id).await {
        Ok(entities) => Ok(entities.into_iter().map(User::from).collect()),
        Err(e) => {
            tracing::error!("Unable to get list of users viewing stream: {}", e);
            Err(e.into())
        }
    }
}

/// 获取观看过某直播的用户总数
pub async fn get_total_number_of_users_viewed_stream(
    pool: &PgPool,
    stream_id: Uuid,
) -> ServiceResult<i64> {
    tracing::debug!("Getting total number of users who viewed a stream: {}", stream_id);

    Ok(ViewRepository::count_viewers(pool, stream_id).await?)
}

///// 订阅相关 ////

/// 创建从 subscribe_from 指向 subscribe_to 的订阅
pub async fn create_subscription(
    pool: &PgPool,
    subscribe_from: Uuid,
    subscribe_to: Uuid,
) -> ServiceResult<Subscription> {
    tracing::debug!("Subscribing from user {} to user {}", subscribe_from, subscribe_to);

    SubscriptionRepository::create(pool, subscribe_from, subscribe_to).await
}
