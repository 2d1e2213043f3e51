use early_access::configuration::{get_configuration, SERVICE_ACCOUNT_ENV};
use early_access::startup::Application;
use early_access::telemetry::{get_subscriber, init_subscriber};
use once_cell::sync::Lazy;
use wiremock::MockServer;

static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

// Credentials are read from the environment once per `Application::build`;
// setting them inside a Lazy keeps concurrent test threads out of `set_var`.
static SERVICE_ACCOUNT: Lazy<()> = Lazy::new(|| {
    let blob = serde_json::json!({
        "project_id": "test-project",
        "access_token": "test-token"
    });
    std::env::set_var(SERVICE_ACCOUNT_ENV, blob.to_string());
});

pub struct TestApp {
    pub address: String,
    pub store_server: MockServer,
}

impl TestApp {
    pub async fn post_signup(&self, body: String) -> reqwest::Response {
        // The success path answers with a redirect; keep it observable.
        reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap()
            .post(&format!("{}/signup", &self.address))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .expect("Failed to send request")
    }
}

pub async fn spawn_app() -> TestApp {
    // The first time `initalize` is invoked the code in TRACING is executed
    // All other invocations will instead skip execution
    Lazy::force(&TRACING);
    Lazy::force(&SERVICE_ACCOUNT);

    // Stand in for the document store API
    let store_server = MockServer::start().await;

    let configuration = {
        let mut c = get_configuration().expect("Failted to read configuration");
        c.store.base_url = store_server.uri();
        // use a random OS port
        c.application.port = 0;
        c
    };

    // Launch the app
    let application = Application::build(configuration)
        .await
        .expect("Failed to create app");
    let address = format!("http://127.0.0.1:{}", application.port());
    let _ = tokio::spawn(application.run_until_stopped());

    TestApp {
        address,
        store_server,
    }
}
