//! Local HTTP fixture server for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use axum::{http::StatusCode, routing::get, Router};

pub const HEART_CSV: &str = "\
age,anaemia,creatinine_phosphokinase,diabetes,ejection_fraction,high_blood_pressure,platelets,serum_creatinine,serum_sodium,sex,smoking,time,DEATH_EVENT
75,0,582,0,20,1,265000,1.9,130,1,0,4,1
55,0,7861,0,38,0,263358.03,1.1,136,1,0,6,1
65,0,146,0,20,0,162000,1.3,129,1,1,7,1
75,0,582,0,20,1,265000,1.9,130,1,0,4,1
50,1,111,0,20,0,210000,1.9,137,1,0,7,1
60.667,1,151,1,40,1,201000,1,136,0,0,172,0
45,0,2413,0,38,0,140000,1.4,140,1,1,280,0
";

pub const SCENARIO_CSV: &str = "age,sex,smoking\n5,1,0\n5,1,0\n45,0,1\n";

pub const MISSING_CSV: &str = "age,sex,smoking\n75,1,0\n55,,1\n";

pub const NO_AGE_CSV: &str = "years,sex\n75,1\n";

/// Serve the fixtures on an ephemeral port. Unknown paths return 404.
pub async fn spawn_server() -> SocketAddr {
    let app = Router::new()
        .route("/heart.csv", get(|| async { HEART_CSV }))
        .route("/scenario.csv", get(|| async { SCENARIO_CSV }))
        .route("/missing.csv", get(|| async { MISSING_CSV }))
        .route("/no-age.csv", get(|| async { NO_AGE_CSV }))
        .route("/empty.csv", get(|| async { "" }))
        .route("/header-only.csv", get(|| async { "age,sex\n" }))
        .route(
            "/error.csv",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        )
        .route(
            "/slow.csv",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                SCENARIO_CSV
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

pub fn url(addr: SocketAddr, path: &str) -> String {
    format!("http://{}{}", addr, path)
}
