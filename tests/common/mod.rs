#![allow(dead_code)]

use actix_web::{
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    post, web, App, HttpRequest, HttpResponse, HttpServer,
};
use aiwatch::classifier::{ClassifierClient, ClassifierConfig};
use aiwatch::db::{initialize_db_pool_sized, run_migrations};
use aiwatch::ingest::Ingestor;
use aiwatch::metadata::MetadataClient;
use aiwatch::models::channel::{Channel, NewChannel};
use aiwatch::models::video::{NewVideo, PartialVideo, Video};
use aiwatch::{api, DbPool};
use chrono::Utc;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::SqliteConnection;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

pub const API_KEY: &str = "sk-test";

/// What the fake upstream services saw, plus switches to make them fail.
#[derive(Default)]
pub struct FakeUpstream {
    pub list_calls: AtomicUsize,
    pub transcript_calls: AtomicUsize,
    pub completion_calls: AtomicUsize,
    pub transcript_languages: Mutex<Vec<String>>,
    pub last_prompt: Mutex<String>,
    pub fail_listing: AtomicBool,
}

impl FakeUpstream {
    pub fn transcripts(&self) -> usize {
        self.transcript_calls.load(Ordering::SeqCst)
    }

    pub fn completions(&self) -> usize {
        self.completion_calls.load(Ordering::SeqCst)
    }
}

#[post("/extract-channel-info")]
async fn extract_channel_info(body: web::Json<Value>) -> HttpResponse {
    let url = body["url"].as_str().unwrap_or_default();
    if url.contains("unknown") {
        return HttpResponse::NotFound().json(json!({ "detail": "Channel not found" }));
    }

    let (channel_id, name) = if url.contains("DotCSV") {
        ("UCdotcsv", "Dot CSV")
    } else if url.contains("ExampleAI") {
        ("UC123", "Example AI")
    } else {
        ("UCother", "Other Channel")
    };
    HttpResponse::Ok().json(json!({
        "channel_id": channel_id,
        "name": name,
        "url": url,
        "description": "AI news and tools",
    }))
}

/// Three dated uploads, one with an unusable date and one missing its title.
#[post("/get-channel-videos")]
async fn get_channel_videos(
    state: web::Data<FakeUpstream>,
    query: web::Query<HashMap<String, String>>,
) -> HttpResponse {
    state.list_calls.fetch_add(1, Ordering::SeqCst);
    if state.fail_listing.load(Ordering::SeqCst) {
        return HttpResponse::InternalServerError().json(json!({ "detail": "quota exceeded" }));
    }

    let channel_id = query.get("channel_id").cloned().unwrap_or_default();
    let max_results: usize = query
        .get("max_results")
        .and_then(|m| m.parse().ok())
        .unwrap_or(10);

    let mut videos: Vec<Value> = (1..=3)
        .map(|i| {
            json!({
                "video_id": format!("{channel_id}-v{i}"),
                "title": format!("Episode {i}"),
                "description": "",
                "url": format!("https://www.youtube.com/watch?v={channel_id}-v{i}"),
                "duration": "PT12M",
                "published_at": format!("2024-05-0{i}T10:00:00Z"),
                "thumbnail": null,
            })
        })
        .collect();
    videos.push(json!({
        "video_id": format!("{channel_id}-undated"),
        "title": "Undated",
        "url": "https://www.youtube.com/watch?v=undated",
        "published_at": "some day",
    }));
    videos.push(json!({
        "video_id": format!("{channel_id}-untitled"),
        "url": "https://www.youtube.com/watch?v=untitled",
        "published_at": "2024-05-04T10:00:00Z",
    }));
    videos.truncate(max_results);

    HttpResponse::Ok().json(json!({ "videos": videos }))
}

#[post("/get-transcript")]
async fn get_transcript(state: web::Data<FakeUpstream>, body: web::Json<Value>) -> HttpResponse {
    state.transcript_calls.fetch_add(1, Ordering::SeqCst);
    let video_id = body["video_id"].as_str().unwrap_or_default().to_string();
    let language = body["language"].as_str().unwrap_or_default().to_string();
    if let Ok(mut languages) = state.transcript_languages.lock() {
        languages.push(language);
    }

    if video_id.contains("notranscript") {
        return HttpResponse::NotFound()
            .json(json!({ "detail": "No transcript available for this video" }));
    }
    if video_id.contains("slow") {
        actix_rt::time::sleep(Duration::from_millis(500)).await;
    }

    HttpResponse::Ok().json(json!({
        "transcript_raw": format!("[00:00] hello\n[00:05] this is {video_id}"),
        "transcript_clean": format!("Hello, this is {video_id}. Today we try Cursor and Claude."),
    }))
}

#[post("/v1/chat/completions")]
async fn chat_completions(
    state: web::Data<FakeUpstream>,
    req: HttpRequest,
    body: web::Json<Value>,
) -> HttpResponse {
    state.completion_calls.fetch_add(1, Ordering::SeqCst);

    let authorized = req
        .headers()
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .is_some_and(|h| h == format!("Bearer {API_KEY}"));
    if !authorized {
        return HttpResponse::Unauthorized().json(json!({ "error": { "message": "bad key" } }));
    }

    let prompt = body["messages"][1]["content"].as_str().unwrap_or_default().to_string();
    if let Ok(mut last) = state.last_prompt.lock() {
        *last = prompt.clone();
    }
    if prompt.contains("badanalysis") {
        return HttpResponse::InternalServerError()
            .json(json!({ "error": { "message": "model overloaded" } }));
    }

    let analysis = json!({
        "category": "TOOLS",
        "priority": "HIGH",
        "summary": "Hands-on with Cursor and Claude.",
        "tools": [
            {"name": "Cursor", "description": "AI code editor", "category": "CODE",
             "url": "https://cursor.com", "pricing": "Freemium", "features": ["chat", "autocomplete"]},
            {"name": "Claude", "description": "Assistant", "category": "TEXT"}
        ],
        "news": [
            {"title": "New Claude model released", "summary": "Better at code.", "importance": "CRITICAL"}
        ]
    });
    HttpResponse::Ok().json(json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": analysis.to_string()},
            "finish_reason": "stop"
        }]
    }))
}

/// Serves both fake upstreams on an ephemeral port.
async fn start_fake_upstream(state: Arc<FakeUpstream>) -> String {
    let data = web::Data::from(state);
    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .service(extract_channel_info)
            .service(get_channel_videos)
            .service(get_transcript)
            .service(chat_completions)
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("Failed to bind fake upstream");

    let addr = server.addrs()[0];
    actix_rt::spawn(server.run());
    format!("http://{addr}")
}

pub struct TestContext {
    _temp_dir: TempDir,
    pub pool: web::Data<DbPool>,
    pub ingestor: web::Data<Ingestor>,
    pub upstream: Arc<FakeUpstream>,
}

fn create_test_db() -> (TempDir, DbPool) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("test.db");
    let pool = initialize_db_pool_sized(&db_path.display().to_string(), 4)
        .expect("Failed to create pool");

    let mut conn = pool.get().expect("Failed to get connection");
    run_migrations(&mut conn).expect("Failed to run migrations");

    (temp_dir, pool)
}

impl TestContext {
    /// Both external services configured and pointing at the fakes.
    pub async fn new() -> Self {
        Self::new_with(|ingestor| ingestor).await
    }

    /// Like [`TestContext::new`], letting the caller adjust the `Ingestor`.
    pub async fn new_with(configure: impl FnOnce(Ingestor) -> Ingestor) -> Self {
        let upstream = Arc::new(FakeUpstream::default());
        let base = start_fake_upstream(upstream.clone()).await;

        let metadata = MetadataClient::new(Some(base.clone()), Duration::from_secs(5))
            .expect("metadata client");
        let classifier = ClassifierClient::new(ClassifierConfig {
            api_key: Some(API_KEY.to_string()),
            base_url: format!("{base}/v1"),
            timeout: Duration::from_secs(5),
            ..Default::default()
        })
        .expect("classifier client");

        Self::with_ingestor(configure(Ingestor::new(metadata, classifier)), upstream)
    }

    /// Neither the metadata URL nor the API key is set.
    pub fn unconfigured() -> Self {
        let metadata = MetadataClient::new(None, Duration::from_secs(1)).expect("metadata client");
        let classifier =
            ClassifierClient::new(ClassifierConfig::default()).expect("classifier client");
        Self::with_ingestor(
            Ingestor::new(metadata, classifier),
            Arc::new(FakeUpstream::default()),
        )
    }

    fn with_ingestor(ingestor: Ingestor, upstream: Arc<FakeUpstream>) -> Self {
        let (temp_dir, pool) = create_test_db();
        Self {
            _temp_dir: temp_dir,
            pool: web::Data::new(pool),
            ingestor: web::Data::new(ingestor),
            upstream,
        }
    }

    pub fn conn(&self) -> PooledConnection<ConnectionManager<SqliteConnection>> {
        self.pool.get().expect("Failed to get connection")
    }

    pub fn insert_channel(&self, channel_id: &str, language: &str) -> Channel {
        let now = Utc::now().naive_utc();
        NewChannel {
            channel_id,
            name: "Seeded Channel",
            url: "https://www.youtube.com/@seeded",
            description: None,
            language,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
        .insert(&mut self.conn())
        .expect("Failed to insert channel")
    }

    pub fn insert_video(&self, channel_pk: i32, video_id: &str, transcript: Option<&str>) -> Video {
        let now = Utc::now().naive_utc();
        let mut conn = self.conn();
        let video = NewVideo {
            video_id,
            channel_id: channel_pk,
            title: &format!("Video {video_id}"),
            description: None,
            url: &format!("https://www.youtube.com/watch?v={video_id}"),
            duration: None,
            published_at: now,
            thumbnail: None,
            created_at: now,
            updated_at: now,
        }
        .insert(&mut conn)
        .expect("Failed to insert video");

        match transcript {
            Some(text) => {
                let update = PartialVideo {
                    transcript_raw: Some(text.to_string()),
                    transcript_clean: Some(text.to_string()),
                    ..Default::default()
                };
                Video::update(&mut conn, video.id, &update).expect("Failed to store transcript")
            }
            None => video,
        }
    }

    pub fn video(&self, video_id: &str) -> Video {
        Video::get_by_video_id(&mut self.conn(), video_id)
            .expect("query failed")
            .expect("video missing")
    }

    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Response = ServiceResponse,
            Error = actix_web::Error,
            Config = (),
            InitError = (),
        >,
    > {
        App::new()
            .app_data(self.pool.clone())
            .app_data(self.ingestor.clone())
            .service(api::health::routes())
            .service(api::routes())
    }
}
