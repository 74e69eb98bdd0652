use std::net::SocketAddr;

use configs::AppConfig;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::json;
use server::links::PublicPerson;
use tokio::net::TcpListener;

struct TestApp {
    base_url: String,
}

async fn start_server() -> anyhow::Result<TestApp> {
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    let mut cfg = AppConfig::default();
    cfg.server.port = addr.port();
    let app = server::startup::build_app(&cfg);

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

#[tokio::test]
async fn e2e_seeded_list_uses_request_host() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::get(format!("{}/persons", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let persons = res.json::<Vec<PublicPerson>>().await?;
    assert_eq!(persons.len(), 2);
    assert_eq!(persons[0].uri, format!("{}/persons/1", app.base_url));
    assert_eq!(persons[1].uri, format!("{}/persons/2", app.base_url));
    Ok(())
}

#[tokio::test]
async fn e2e_create_update_delete_cycle() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = c
        .post(format!("{}/persons", app.base_url))
        .json(&json!({"name": "A", "address": "B", "phone_number": "1", "personnummer": "2", "account_balance": 0}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let created = res.json::<PublicPerson>().await?;
    assert_eq!(created.uri, format!("{}/persons/3", app.base_url));

    // the advertised update link is usable as-is
    let update = created.links.iter().find(|l| l.rel == "update").expect("update link");
    assert_eq!(update.method.as_deref(), Some("PUT"));
    let res = c.put(&update.href).json(&json!({"account_balance": 12.5})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let updated = res.json::<PublicPerson>().await?;
    assert_eq!(updated.account_balance, Some(12.5));
    assert_eq!(updated.name.as_deref(), Some("A"));

    let res = c.delete(&created.uri).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<serde_json::Value>().await?, json!({"result": true}));

    let res = c.get(&created.uri).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}
