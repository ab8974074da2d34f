//! Shared test harness: a mocked Bot API and fake external tools
//!
//! The fake tools are small shell scripts written into a temp directory, so
//! everything here is unix-only.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use reelbot::download::DownloadSettings;
use teloxide::types::{CallbackQuery, Message};
use tempfile::TempDir;
use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const CHAT_ID: i64 = 123456789;
pub const USER_ID: u64 = 555;
pub const BOT_ID: u64 = 987654321;

/// Mocked Telegram Bot API
pub struct TelegramMock {
    pub server: MockServer,
    pub bot: teloxide::Bot,
}

impl TelegramMock {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let bot = teloxide::Bot::new("test_token_12345:ABCDEF").set_api_url(server.uri().parse().unwrap());
        Self { server, bot }
    }

    /// Answers every Bot API method the bot uses
    pub async fn mock_all(&self) {
        let message = serde_json::json!({
            "ok": true,
            "result": {
                "message_id": 42,
                "from": { "id": BOT_ID, "is_bot": true, "first_name": "TestBot" },
                "chat": { "id": CHAT_ID, "type": "private", "first_name": "Test" },
                "date": 1735992000,
                "text": "Response"
            }
        });
        let ok_true = serde_json::json!({ "ok": true, "result": true });

        for api_method in ["answerCallbackQuery", "deleteMessage", "setMyCommands"] {
            Mock::given(method("POST"))
                .and(path_regex(format!("/bot[^/]+/{}", api_method)))
                .respond_with(ResponseTemplate::new(200).set_body_json(ok_true.clone()))
                .mount(&self.server)
                .await;
        }

        // sendMessage, editMessageText and every send* upload return a Message
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(message))
            .mount(&self.server)
            .await;
    }

    /// Makes `api_method` fail with a Bot API error; mount before [`Self::mock_all`]
    pub async fn mock_failure(&self, api_method: &str) {
        let error = serde_json::json!({
            "ok": false,
            "error_code": 400,
            "description": "Bad Request: file upload rejected"
        });
        Mock::given(method("POST"))
            .and(path_regex(format!("/bot[^/]+/{}", api_method)))
            .respond_with(ResponseTemplate::new(400).set_body_json(error))
            .mount(&self.server)
            .await;
    }

    /// Bot API method names in request order
    pub async fn methods(&self) -> Vec<String> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter_map(|r| r.url.path().rsplit('/').next().map(str::to_string))
            .collect()
    }

    /// JSON bodies of all requests to `api_method`
    pub async fn json_bodies(&self, api_method: &str) -> Vec<serde_json::Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.url.path().ends_with(&format!("/{}", api_method)))
            .filter_map(|r| serde_json::from_slice(&r.body).ok())
            .collect()
    }
}

/// Incoming text message from the test user
pub fn text_message(text: &str) -> Message {
    let json = serde_json::json!({
        "message_id": 1,
        "date": 1735992000,
        "chat": { "id": CHAT_ID, "type": "private", "first_name": "Test", "username": "testuser" },
        "from": { "id": USER_ID, "is_bot": false, "first_name": "Test", "username": "testuser" },
        "text": text
    });
    serde_json::from_value(json).unwrap()
}

/// Callback query on the bot's message 42
pub fn callback_query(data: &str) -> CallbackQuery {
    let json = serde_json::json!({
        "id": "callback_123",
        "from": { "id": USER_ID, "is_bot": false, "first_name": "Test" },
        "message": {
            "message_id": 42,
            "date": 1735992000,
            "chat": { "id": CHAT_ID, "type": "private", "first_name": "Test" },
            "from": { "id": BOT_ID, "is_bot": true, "first_name": "TestBot" },
            "text": "Results"
        },
        "chat_instance": "chat_instance_123",
        "data": data
    });
    serde_json::from_value(json).unwrap()
}

/// Temp directory holding the download dir and the fake tool scripts
pub struct FakeTools {
    pub root: TempDir,
}

impl FakeTools {
    pub fn new() -> Self {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("downloads")).unwrap();
        Self { root }
    }

    pub fn download_dir(&self) -> PathBuf {
        self.root.path().join("downloads")
    }

    /// Writes an executable script named `name`
    pub fn script(&self, name: &str, body: &str) -> String {
        use std::os::unix::fs::PermissionsExt;

        let path = self.root.path().join(name);
        fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path.to_string_lossy().to_string()
    }

    /// Settings with every tool missing; tests swap in the scripts they need
    pub fn settings(&self) -> DownloadSettings {
        let mut settings = DownloadSettings::new(self.download_dir());
        settings.ytdlp_bin = "missing-yt-dlp-reelbot".to_string();
        settings.instaloader_bin = "missing-instaloader-reelbot".to_string();
        settings.ffmpeg_bin = "missing-ffmpeg-reelbot".to_string();
        settings
    }

    pub fn files(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.download_dir())
            .unwrap()
            .filter_map(Result::ok)
            .map(|e| e.file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }
}

/// instaloader that writes `<shortcode>.<ext>` into the dirname pattern
pub fn instaloader_writing(ext: &str) -> String {
    format!(
        r#"dir=""; last=""
while [ $# -gt 0 ]; do
  case "$1" in
    --dirname-pattern) dir="$2"; shift 2 ;;
    *) last="$1"; shift ;;
  esac
done
code="${{last#-}}"
printf 'media' > "$dir/$code.{}""#,
        ext
    )
}

/// Tool that fails with the given stderr
pub fn failing_with(stderr: &str) -> String {
    format!("echo '{}' >&2\nexit 1", stderr)
}

/// yt-dlp that answers searches with `search_json` and downloads `<id>.mp3`
pub fn ytdlp_music(search_json: &str, video_id: &str) -> String {
    format!(
        r#"case " $* " in
  *" --dump-single-json "*)
    cat <<'JSON'
{}
JSON
    exit 0 ;;
esac
out=""
while [ $# -gt 0 ]; do
  case "$1" in
    -o) out="$2"; shift 2 ;;
    *) shift ;;
  esac
done
dir=$(dirname "$out")
printf 'mp3' > "$dir/{id}.mp3"
echo '{{"id": "{id}", "title": "Downloaded Title", "uploader": "Uploader", "channel": null}}'"#,
        search_json,
        id = video_id
    )
}

/// yt-dlp Instagram fallback: writes `<dir>/<name>` and prints its path
pub fn ytdlp_instagram(name: &str) -> String {
    format!(
        r#"out=""
while [ $# -gt 0 ]; do
  case "$1" in
    -o) out="$2"; shift 2 ;;
    *) shift ;;
  esac
done
dir=$(dirname "$out")
printf 'media' > "$dir/{name}"
echo "$dir/{name}""#,
        name = name
    )
}

/// yt-dlp Instagram fallback that also writes its argv, one per line, to `argv_file`
pub fn ytdlp_recording_argv(argv_file: &str, name: &str) -> String {
    format!(
        r#"for arg in "$@"; do printf '%s\n' "$arg" >> '{argv}'; done
{rest}"#,
        argv = argv_file,
        rest = ytdlp_instagram(name)
    )
}

/// instaloader that writes a two-item carousel `<shortcode>_1.jpg`, `<shortcode>_2.jpg`
pub fn instaloader_carousel() -> String {
    r#"dir=""; last=""
while [ $# -gt 0 ]; do
  case "$1" in
    --dirname-pattern) dir="$2"; shift 2 ;;
    *) last="$1"; shift ;;
  esac
done
code="${last#-}"
printf 'one' > "$dir/${code}_1.jpg"
printf 'two' > "$dir/${code}_2.jpg"
printf 'caption' > "$dir/${code}.txt""#
        .to_string()
}
