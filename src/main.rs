use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{delete, get, post, web, App, HttpResponse, HttpServer};
use mongodb::Client;
use tracing_subscriber::EnvFilter;

mod balance;
mod config;
mod currency;
mod dto;
mod error;
mod repository;
mod schemas;
mod usecases;

use crate::config::AppConfig;
use crate::dto::{
    BalancesQuery, CreateExpenseRequest, CreateGroupRequest, CreateMemberRequest,
    GroupBalancesResponse, GroupResponse,
};
use crate::error::{ApiError, UseCaseError};
use crate::repository::{GroupRepository, MongoGroupRepository};

struct AppState {
    repository: Arc<dyn GroupRepository>,
}

#[post("/groups")]
async fn create_group(
    state: web::Data<AppState>,
    json: web::Json<CreateGroupRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = json.into_inner();
    request.validate()?;
    let group = usecases::create_group(state.repository.as_ref(), request).await?;
    Ok(HttpResponse::Created().json(GroupResponse::from_group(&group)))
}

#[get("/groups/{group_id}")]
async fn get_group(
    state: web::Data<AppState>,
    group_id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let group = usecases::get_group(state.repository.as_ref(), &group_id).await?;
    Ok(HttpResponse::Ok().json(GroupResponse::from_group(&group)))
}

#[post("/groups/{group_id}/members")]
async fn add_member(
    state: web::Data<AppState>,
    group_id: web::Path<String>,
    json: web::Json<CreateMemberRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = json.into_inner();
    request.validate()?;
    let group = usecases::add_member(state.repository.as_ref(), &group_id, request).await?;
    Ok(HttpResponse::Created().json(GroupResponse::from_group(&group)))
}

#[post("/groups/{group_id}/expenses")]
async fn add_expense(
    state: web::Data<AppState>,
    group_id: web::Path<String>,
    json: web::Json<CreateExpenseRequest>,
) -> Result<HttpResponse, ApiError> {
    let expense = json.into_inner().validate()?;
    let group = usecases::add_expense(state.repository.as_ref(), &group_id, expense).await?;
    Ok(HttpResponse::Created().json(GroupResponse::from_group(&group)))
}

#[get("/groups/{group_id}/balances")]
async fn get_balances(
    state: web::Data<AppState>,
    group_id: web::Path<String>,
    query: web::Query<BalancesQuery>,
) -> Result<HttpResponse, ApiError> {
    let currency = query.currency_code()?;
    let (group, balances) = usecases::get_balances(state.repository.as_ref(), &group_id).await?;
    Ok(HttpResponse::Ok().json(GroupBalancesResponse::from_balances(
        &group, &balances, currency,
    )))
}

#[delete("/groups/{group_id}")]
async fn delete_group(
    state: web::Data<AppState>,
    group_id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let group_id = group_id.into_inner();
    if !usecases::delete_group(state.repository.as_ref(), &group_id).await? {
        return Err(UseCaseError::GroupNotFound(group_id).into());
    }
    Ok(HttpResponse::NoContent().finish())
}

fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(create_group)
        .service(get_group)
        .service(add_member)
        .service(add_expense)
        .service(get_balances)
        .service(delete_group);
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env().expect("invalid configuration");
    let client = Client::with_uri_str(&config.mongodb_uri)
        .await
        .expect("failed to connect to MongoDB");
    tracing::info!(database = %config.database_name, "connected to MongoDB");

    let state = web::Data::new(AppState {
        repository: Arc::new(MongoGroupRepository::new(&client, &config.database_name)),
    });

    let bind_address = config.bind_address.clone();
    tracing::info!(%bind_address, "starting server");

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(state.clone())
            .configure(configure_routes)
    })
    .bind(bind_address)?
    .run()
    .await
}
