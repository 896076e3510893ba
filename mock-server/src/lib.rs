use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Car {
    pub id: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: f64,
    pub mileage: i64,
    pub color: String,
    pub condition: String,
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateCar {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: f64,
    pub mileage: i64,
    pub color: String,
    pub condition: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateCar {
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub price: Option<f64>,
    pub mileage: Option<i64>,
    pub color: Option<String>,
    pub condition: Option<String>,
    pub description: Option<String>,
}

// Stored with the plaintext password; serialization drops it so responses
// match the backend's UserResponse shape.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
}

#[derive(Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub car_id: String,
    pub user_id: String,
    pub price: f64,
    pub status: String,
}

#[derive(Deserialize)]
pub struct CreateOrder {
    pub car_id: String,
    pub user_id: String,
    pub price: f64,
    #[serde(default = "default_order_status")]
    pub status: String,
}

fn default_order_status() -> String {
    "Completed".to_string()
}

#[derive(Serialize)]
pub struct CarStats {
    pub total_cars: u64,
    pub by_make: Vec<MakeStats>,
    pub by_condition: Vec<ConditionStats>,
    pub price_range: PriceRange,
}

#[derive(Serialize)]
pub struct MakeStats {
    pub make: String,
    pub count: u64,
    pub avg_price: f64,
    pub total_mileage: i64,
    pub min_year: i32,
    pub max_year: i32,
}

#[derive(Serialize)]
pub struct ConditionStats {
    pub condition: String,
    pub count: u64,
    pub avg_price: f64,
}

#[derive(Serialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

#[derive(Deserialize)]
pub struct CarListQuery {
    pub make: Option<String>,
    pub condition: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_year: Option<i32>,
    pub max_year: Option<i32>,
}

#[derive(Deserialize)]
pub struct StatsQuery {
    pub make: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

#[derive(Deserialize)]
pub struct LoginQuery {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct OrderListQuery {
    pub user_id: String,
}

#[derive(Default)]
pub struct Store {
    pub cars: HashMap<String, Car>,
    pub users: HashMap<String, User>,
    pub orders: HashMap<String, Order>,
}

pub type Db = Arc<RwLock<Store>>;

type ErrorResponse = (StatusCode, Json<Value>);

fn detail(status: StatusCode, message: &str) -> ErrorResponse {
    (status, Json(json!({ "detail": message })))
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/users/", post(create_user))
        .route("/users/login/", post(login_user))
        .route("/cars/", get(list_cars).post(create_car))
        .route("/cars/stats/aggregation", get(car_stats))
        .route("/cars/{id}", get(get_car).put(update_car).delete(delete_car))
        .route("/orders/", get(list_orders).post(create_order))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

// --- users ---

async fn create_user(
    State(db): State<Db>,
    Json(input): Json<CreateUser>,
) -> Result<(StatusCode, Json<User>), ErrorResponse> {
    let mut store = db.write().await;
    if store.users.values().any(|u| u.email == input.email) {
        return Err(detail(StatusCode::BAD_REQUEST, "Email already registered"));
    }
    let user = User {
        id: Uuid::new_v4().to_string(),
        name: input.name,
        email: input.email,
        password: input.password,
    };
    store.users.insert(user.id.clone(), user.clone());
    Ok((StatusCode::CREATED, Json(user)))
}

async fn login_user(
    State(db): State<Db>,
    Query(credentials): Query<LoginQuery>,
) -> Result<Json<Value>, ErrorResponse> {
    let store = db.read().await;
    let user = store
        .users
        .values()
        .find(|u| u.email == credentials.email && u.password == credentials.password)
        .ok_or_else(|| detail(StatusCode::UNAUTHORIZED, "Invalid credentials"))?;
    Ok(Json(json!({
        "message": "Login successful",
        "user_id": user.id,
        "email": user.email,
        "name": user.name,
    })))
}

// --- cars ---

fn matches_listing(car: &Car, query: &CarListQuery) -> bool {
    if let Some(make) = &query.make {
        if &car.make != make {
            return false;
        }
    }
    if let Some(condition) = &query.condition {
        if &car.condition != condition {
            return false;
        }
    }
    if let Some(min_price) = query.min_price {
        if car.price < min_price {
            return false;
        }
    }
    if let Some(max_price) = query.max_price {
        if car.price > max_price {
            return false;
        }
    }
    if let Some(min_year) = query.min_year {
        if car.year < min_year {
            return false;
        }
    }
    if let Some(max_year) = query.max_year {
        if car.year > max_year {
            return false;
        }
    }
    true
}

async fn list_cars(
    State(db): State<Db>,
    Query(query): Query<CarListQuery>,
) -> Json<Vec<Car>> {
    let store = db.read().await;
    let mut cars: Vec<Car> = store
        .cars
        .values()
        .filter(|car| matches_listing(car, &query))
        .cloned()
        .collect();
    cars.sort_by(|a, b| a.make.cmp(&b.make).then(b.year.cmp(&a.year)));
    Json(cars)
}

async fn create_car(
    State(db): State<Db>,
    Json(input): Json<CreateCar>,
) -> (StatusCode, Json<Car>) {
    let car = Car {
        id: Uuid::new_v4().to_string(),
        make: input.make,
        model: input.model,
        year: input.year,
        price: input.price,
        mileage: input.mileage,
        color: input.color,
        condition: input.condition,
        description: input.description,
    };
    db.write().await.cars.insert(car.id.clone(), car.clone());
    (StatusCode::CREATED, Json(car))
}

async fn get_car(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Car>, ErrorResponse> {
    let store = db.read().await;
    store
        .cars
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Car not found"))
}

async fn update_car(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<UpdateCar>,
) -> Result<Json<Car>, ErrorResponse> {
    let mut store = db.write().await;
    let car = store
        .cars
        .get_mut(&id)
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Car not found"))?;
    if let Some(make) = input.make {
        car.make = make;
    }
    if let Some(model) = input.model {
        car.model = model;
    }
    if let Some(year) = input.year {
        car.year = year;
    }
    if let Some(price) = input.price {
        car.price = price;
    }
    if let Some(mileage) = input.mileage {
        car.mileage = mileage;
    }
    if let Some(color) = input.color {
        car.color = color;
    }
    if let Some(condition) = input.condition {
        car.condition = condition;
    }
    if let Some(description) = input.description {
        car.description = Some(description);
    }
    Ok(Json(car.clone()))
}

async fn delete_car(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Car>, ErrorResponse> {
    let mut store = db.write().await;
    store
        .cars
        .remove(&id)
        .map(Json)
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Car not found"))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

async fn car_stats(
    State(db): State<Db>,
    Query(query): Query<StatsQuery>,
) -> Json<CarStats> {
    let store = db.read().await;
    let cars: Vec<&Car> = store
        .cars
        .values()
        .filter(|car| {
            query.make.as_ref().is_none_or(|make| &car.make == make)
                && query.min_price.is_none_or(|min| car.price >= min)
                && query.max_price.is_none_or(|max| car.price <= max)
        })
        .collect();

    if cars.is_empty() {
        return Json(CarStats {
            total_cars: 0,
            by_make: Vec::new(),
            by_condition: Vec::new(),
            price_range: PriceRange { min: 0.0, max: 0.0, avg: 0.0 },
        });
    }

    let mut by_make: HashMap<&str, Vec<&Car>> = HashMap::new();
    let mut by_condition: HashMap<&str, Vec<&Car>> = HashMap::new();
    for car in &cars {
        by_make.entry(&car.make).or_default().push(car);
        by_condition.entry(&car.condition).or_default().push(car);
    }

    let mut by_make: Vec<MakeStats> = by_make
        .into_iter()
        .map(|(make, group)| MakeStats {
            make: make.to_string(),
            count: group.len() as u64,
            avg_price: round2(
                group.iter().map(|c| c.price).sum::<f64>() / group.len() as f64,
            ),
            total_mileage: group.iter().map(|c| c.mileage).sum(),
            min_year: group.iter().map(|c| c.year).min().unwrap_or(0),
            max_year: group.iter().map(|c| c.year).max().unwrap_or(0),
        })
        .collect();
    by_make.sort_by(|a, b| b.count.cmp(&a.count).then(a.make.cmp(&b.make)));

    let mut by_condition: Vec<ConditionStats> = by_condition
        .into_iter()
        .map(|(condition, group)| ConditionStats {
            condition: condition.to_string(),
            count: group.len() as u64,
            avg_price: round2(
                group.iter().map(|c| c.price).sum::<f64>() / group.len() as f64,
            ),
        })
        .collect();
    by_condition.sort_by(|a, b| b.count.cmp(&a.count).then(a.condition.cmp(&b.condition)));

    let prices: Vec<f64> = cars.iter().map(|c| c.price).collect();
    let price_range = PriceRange {
        min: round2(prices.iter().cloned().fold(f64::INFINITY, f64::min)),
        max: round2(prices.iter().cloned().fold(f64::NEG_INFINITY, f64::max)),
        avg: round2(prices.iter().sum::<f64>() / prices.len() as f64),
    };

    Json(CarStats {
        total_cars: cars.len() as u64,
        by_make,
        by_condition,
        price_range,
    })
}

// --- orders ---

async fn create_order(
    State(db): State<Db>,
    Json(input): Json<CreateOrder>,
) -> (StatusCode, Json<Order>) {
    let order = Order {
        id: Uuid::new_v4().to_string(),
        car_id: input.car_id,
        user_id: input.user_id,
        price: input.price,
        status: input.status,
    };
    db.write().await.orders.insert(order.id.clone(), order.clone());
    (StatusCode::CREATED, Json(order))
}

async fn list_orders(
    State(db): State<Db>,
    Query(query): Query<OrderListQuery>,
) -> Json<Vec<Order>> {
    let store = db.read().await;
    let mut orders: Vec<Order> = store
        .orders
        .values()
        .filter(|order| order.user_id == query.user_id)
        .cloned()
        .collect();
    orders.sort_by(|a, b| a.id.cmp(&b.id));
    Json(orders)
}
