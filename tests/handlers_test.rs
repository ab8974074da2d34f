//! Integration tests for the real handlers against a mocked Bot API
//!
//! External tools are replaced with shell scripts, so these tests only run
//! on unix. Run with: cargo test --test handlers_test

#![cfg(unix)]

mod common;

use std::ops::ControlFlow;

use pretty_assertions::assert_eq;
use serial_test::serial;
use teloxide::prelude::*;
use teloxide::types::Me;

use common::{
    callback_query, failing_with, instaloader_carousel, instaloader_writing, text_message, ytdlp_instagram, ytdlp_music,
    FakeTools, TelegramMock,
};
use reelbot::storage::{short_key, CachedTrack, MusicCache};
use reelbot::telegram::handlers::{handle_instagram_link, handle_music_callback, handle_music_search};
use reelbot::telegram::{schema, texts, HandlerDeps};

const SEARCH_JSON: &str = r#"{"_type": "playlist", "entries": [
  {"id": "abc123", "title": "Shahzoda - Sevgi", "duration": 245.0, "uploader": "Shahzoda", "channel": null},
  {"id": "def456", "title": "Sevgi (remix)", "duration": null, "uploader": null, "channel": "DJ"}
]}"#;

fn me() -> Me {
    serde_json::from_value(serde_json::json!({
        "id": common::BOT_ID,
        "is_bot": true,
        "first_name": "TestBot",
        "username": "test_bot",
        "can_join_groups": true,
        "can_read_all_group_messages": false,
        "supports_inline_queries": false,
        "can_connect_to_business": false,
        "has_main_web_app": false
    }))
    .unwrap()
}

fn text_update(text: &str) -> Update {
    serde_json::from_value(serde_json::json!({
        "update_id": 1,
        "message": serde_json::to_value(text_message(text)).unwrap()
    }))
    .unwrap()
}

#[tokio::test]
#[serial]
async fn test_start_command_sends_greeting() {
    let tg = TelegramMock::start().await;
    tg.mock_all().await;
    let tools = FakeTools::new();
    let deps = HandlerDeps::new(tools.settings(), MusicCache::new());

    let result = schema(deps)
        .dispatch(dptree::deps![tg.bot.clone(), text_update("/start"), me()])
        .await;
    assert!(matches!(result, ControlFlow::Break(Ok(()))));

    let bodies = tg.json_bodies("sendMessage").await;
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["text"], texts::START_GREETING);
}

#[tokio::test]
#[serial]
async fn test_short_text_and_unknown_commands_are_ignored() {
    let tg = TelegramMock::start().await;
    tg.mock_all().await;
    let tools = FakeTools::new();
    let deps = HandlerDeps::new(tools.settings(), MusicCache::new());
    let handler = schema(deps);

    for text in ["a", "/help"] {
        let _ = handler
            .dispatch(dptree::deps![tg.bot.clone(), text_update(text), me()])
            .await;
    }
    assert!(tg.methods().await.is_empty());
}

#[tokio::test]
#[serial]
async fn test_instagram_photo_is_sent_and_cleaned_up() {
    let tg = TelegramMock::start().await;
    tg.mock_all().await;
    let tools = FakeTools::new();
    let mut settings = tools.settings();
    settings.instaloader_bin = tools.script("instaloader", &instaloader_writing("jpg"));
    let deps = HandlerDeps::new(settings, MusicCache::new());

    let url = "https://www.instagram.com/p/Cx1ab/";
    handle_instagram_link(&tg.bot, &text_message(url), url, &deps)
        .await
        .unwrap();

    assert_eq!(tg.methods().await, vec!["sendMessage", "sendPhoto", "deleteMessage"]);
    let status = &tg.json_bodies("sendMessage").await[0];
    assert_eq!(status["text"], texts::INSTAGRAM_LOADING);
    assert_eq!(status["reply_parameters"]["message_id"], 1);
    assert!(tools.files().is_empty(), "downloaded file must be deleted");
}

#[tokio::test]
#[serial]
async fn test_instagram_fallback_sends_video_and_soundtrack() {
    let tg = TelegramMock::start().await;
    tg.mock_all().await;
    let tools = FakeTools::new();
    let mut settings = tools.settings();
    settings.instaloader_bin = tools.script("instaloader", &failing_with("Fatal error: Login required."));
    settings.ytdlp_bin = tools.script("yt-dlp", &ytdlp_instagram("Cx1ab.mp4"));
    settings.ffmpeg_bin = tools.script("ffmpeg", "for a; do out=\"$a\"; done\nprintf 'mp3' > \"$out\"");
    let deps = HandlerDeps::new(settings, MusicCache::new());

    let url = "https://www.instagram.com/reel/Cx1ab/";
    handle_instagram_link(&tg.bot, &text_message(url), url, &deps)
        .await
        .unwrap();

    assert_eq!(
        tg.methods().await,
        vec!["sendMessage", "sendVideo", "sendAudio", "deleteMessage"]
    );
    assert!(tools.files().is_empty(), "video and extracted audio must be deleted");
}

#[tokio::test]
#[serial]
async fn test_instagram_carousel_leaves_no_files() {
    let tg = TelegramMock::start().await;
    tg.mock_all().await;
    let tools = FakeTools::new();
    let mut settings = tools.settings();
    settings.instaloader_bin = tools.script("instaloader", &instaloader_carousel());
    let deps = HandlerDeps::new(settings, MusicCache::new());

    let url = "https://www.instagram.com/p/Cx1ab/";
    handle_instagram_link(&tg.bot, &text_message(url), url, &deps)
        .await
        .unwrap();

    assert_eq!(tg.methods().await, vec!["sendMessage", "sendPhoto", "deleteMessage"]);
    assert!(tools.files().is_empty(), "every carousel item must be deleted");
}

#[tokio::test]
#[serial]
async fn test_instagram_reel_photo_gets_no_soundtrack() {
    let tg = TelegramMock::start().await;
    tg.mock_all().await;
    let tools = FakeTools::new();
    let mut settings = tools.settings();
    settings.instaloader_bin = tools.script("instaloader", &instaloader_writing("jpg"));
    let ffmpeg_log = tools.root.path().join("ffmpeg-called");
    settings.ffmpeg_bin = tools.script("ffmpeg", &format!("touch '{}'", ffmpeg_log.display()));
    let deps = HandlerDeps::new(settings, MusicCache::new());

    let url = "https://www.instagram.com/reel/Cx1ab/";
    handle_instagram_link(&tg.bot, &text_message(url), url, &deps)
        .await
        .unwrap();

    assert_eq!(tg.methods().await, vec!["sendMessage", "sendPhoto", "deleteMessage"]);
    assert!(!ffmpeg_log.exists(), "audio is only extracted from videos");
}

#[tokio::test]
#[serial]
async fn test_instagram_send_failure_edits_status_and_cleans_up() {
    let tg = TelegramMock::start().await;
    tg.mock_failure("sendPhoto").await;
    tg.mock_all().await;
    let tools = FakeTools::new();
    let mut settings = tools.settings();
    settings.instaloader_bin = tools.script("instaloader", &instaloader_writing("jpg"));
    let deps = HandlerDeps::new(settings, MusicCache::new());

    let url = "https://www.instagram.com/p/Cx1ab/";
    handle_instagram_link(&tg.bot, &text_message(url), url, &deps)
        .await
        .unwrap();

    assert_eq!(tg.methods().await, vec!["sendMessage", "sendPhoto", "editMessageText"]);
    let edit = &tg.json_bodies("editMessageText").await[0];
    assert_eq!(edit["text"], texts::INSTAGRAM_SEND_FAILED);
    assert_eq!(edit["message_id"], 42);
    assert!(tools.files().is_empty(), "downloaded file must be deleted after a failed send");
}

#[tokio::test]
#[serial]
async fn test_instagram_all_sources_fail() {
    let tg = TelegramMock::start().await;
    tg.mock_all().await;
    let tools = FakeTools::new();
    let mut settings = tools.settings();
    settings.instaloader_bin = tools.script("instaloader", &failing_with("Post -Cx1ab does not exist."));
    settings.ytdlp_bin = tools.script("yt-dlp", &failing_with("ERROR: [Instagram] Cx1ab: Unable to extract"));
    let deps = HandlerDeps::new(settings, MusicCache::new());

    let url = "https://www.instagram.com/p/Cx1ab/";
    handle_instagram_link(&tg.bot, &text_message(url), url, &deps)
        .await
        .unwrap();

    assert_eq!(tg.methods().await, vec!["sendMessage", "editMessageText"]);
    let edit = &tg.json_bodies("editMessageText").await[0];
    assert_eq!(edit["text"], texts::INSTAGRAM_DOWNLOAD_FAILED);
    assert_eq!(edit["message_id"], 42);
}

#[tokio::test]
#[serial]
async fn test_music_search_builds_keyboard_and_caches_results() {
    let tg = TelegramMock::start().await;
    tg.mock_all().await;
    let tools = FakeTools::new();
    let mut settings = tools.settings();
    settings.ytdlp_bin = tools.script("yt-dlp", &ytdlp_music(SEARCH_JSON, "abc123"));
    let cache = MusicCache::new();
    let deps = HandlerDeps::new(settings, cache.clone());

    handle_music_search(&tg.bot, &text_message("Sevgi"), "Sevgi", &deps)
        .await
        .unwrap();

    let edit = &tg.json_bodies("editMessageText").await[0];
    assert_eq!(edit["parse_mode"], "MarkdownV2");
    assert_eq!(edit["text"], texts::search_results_header("Sevgi"));

    let rows = edit["reply_markup"]["inline_keyboard"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][0]["text"], "🎵 Shahzoda - Sevgi [4:05]");
    assert_eq!(rows[0][0]["callback_data"], format!("music:{}", short_key("abc123")));
    assert_eq!(rows[1][0]["text"], "🎵 Sevgi (remix) [—]");

    assert_eq!(cache.len(), 2);
    assert_eq!(
        cache.get(&short_key("def456")),
        Some(CachedTrack {
            url: "https://www.youtube.com/watch?v=def456".to_string(),
            title: "Sevgi (remix)".to_string(),
            artist: "DJ".to_string(),
        })
    );
}

#[tokio::test]
#[serial]
async fn test_music_search_nothing_found() {
    let tg = TelegramMock::start().await;
    tg.mock_all().await;
    let tools = FakeTools::new();
    let mut settings = tools.settings();
    settings.ytdlp_bin = tools.script("yt-dlp", &ytdlp_music(r#"{"entries": []}"#, "unused"));
    let deps = HandlerDeps::new(settings, MusicCache::new());

    handle_music_search(&tg.bot, &text_message("zzzz"), "zzzz", &deps)
        .await
        .unwrap();

    let edit = &tg.json_bodies("editMessageText").await[0];
    assert_eq!(edit["text"], texts::NOTHING_FOUND);
    assert!(edit.get("reply_markup").is_none());
}

#[tokio::test]
#[serial]
async fn test_music_callback_with_unknown_key_alerts() {
    let tg = TelegramMock::start().await;
    tg.mock_all().await;
    let tools = FakeTools::new();
    let deps = HandlerDeps::new(tools.settings(), MusicCache::new());

    handle_music_callback(&tg.bot, &callback_query("music:0000000000"), "0000000000", &deps)
        .await
        .unwrap();

    assert_eq!(tg.methods().await, vec!["answerCallbackQuery"]);
    let answer = &tg.json_bodies("answerCallbackQuery").await[0];
    assert_eq!(answer["text"], texts::SEARCH_EXPIRED);
    assert_eq!(answer["show_alert"], true);
}

#[tokio::test]
#[serial]
async fn test_music_callback_downloads_and_sends_audio() {
    let tg = TelegramMock::start().await;
    tg.mock_all().await;
    let tools = FakeTools::new();
    let mut settings = tools.settings();
    settings.ytdlp_bin = tools.script("yt-dlp", &ytdlp_music(SEARCH_JSON, "abc123"));
    let cache = MusicCache::new();
    let key = short_key("abc123");
    cache.insert(
        key.clone(),
        CachedTrack {
            url: "https://www.youtube.com/watch?v=abc123".to_string(),
            title: "Shahzoda - Sevgi".to_string(),
            artist: "Shahzoda".to_string(),
        },
    );
    let deps = HandlerDeps::new(settings, cache);

    handle_music_callback(&tg.bot, &callback_query(&format!("music:{}", key)), &key, &deps)
        .await
        .unwrap();

    assert_eq!(
        tg.methods().await,
        vec!["answerCallbackQuery", "editMessageText", "sendAudio", "deleteMessage"]
    );
    let edit = &tg.json_bodies("editMessageText").await[0];
    assert_eq!(edit["text"], texts::track_downloading("Shahzoda - Sevgi"));
    assert!(tools.files().is_empty(), "track must be deleted after sending");
}

#[tokio::test]
#[serial]
async fn test_music_callback_download_failure() {
    let tg = TelegramMock::start().await;
    tg.mock_all().await;
    let tools = FakeTools::new();
    let mut settings = tools.settings();
    settings.ytdlp_bin = tools.script("yt-dlp", &failing_with("ERROR: [youtube] abc123: Video unavailable"));
    let cache = MusicCache::new();
    cache.insert(
        "k".to_string(),
        CachedTrack {
            url: "https://www.youtube.com/watch?v=abc123".to_string(),
            title: "Song".to_string(),
            artist: String::new(),
        },
    );
    let deps = HandlerDeps::new(settings, cache);

    handle_music_callback(&tg.bot, &callback_query("music:k"), "k", &deps)
        .await
        .unwrap();

    let edits = tg.json_bodies("editMessageText").await;
    assert_eq!(edits.len(), 2);
    assert_eq!(edits[1]["text"], texts::TRACK_DOWNLOAD_FAILED);
    assert!(!tg.methods().await.contains(&"sendAudio".to_string()));
}

fn cached_track_deps(tools: &FakeTools) -> (HandlerDeps, String) {
    let mut settings = tools.settings();
    settings.ytdlp_bin = tools.script("yt-dlp", &ytdlp_music(SEARCH_JSON, "abc123"));
    let cache = MusicCache::new();
    let key = short_key("abc123");
    cache.insert(
        key.clone(),
        CachedTrack {
            url: "https://www.youtube.com/watch?v=abc123".to_string(),
            title: "Shahzoda - Sevgi".to_string(),
            artist: "Shahzoda".to_string(),
        },
    );
    (HandlerDeps::new(settings, cache), key)
}

#[tokio::test]
#[serial]
async fn test_music_callback_send_failure_edits_status_and_cleans_up() {
    let tg = TelegramMock::start().await;
    tg.mock_failure("sendAudio").await;
    tg.mock_all().await;
    let tools = FakeTools::new();
    let (deps, key) = cached_track_deps(&tools);

    handle_music_callback(&tg.bot, &callback_query(&format!("music:{}", key)), &key, &deps)
        .await
        .unwrap();

    assert_eq!(
        tg.methods().await,
        vec!["answerCallbackQuery", "editMessageText", "sendAudio", "editMessageText"]
    );
    let edits = tg.json_bodies("editMessageText").await;
    assert_eq!(edits[1]["text"], texts::TRACK_SEND_FAILED);
    assert!(tools.files().is_empty(), "track must be deleted after a failed send");
}

#[tokio::test]
#[serial]
async fn test_music_callback_continues_when_answer_fails() {
    let tg = TelegramMock::start().await;
    tg.mock_failure("answerCallbackQuery").await;
    tg.mock_all().await;
    let tools = FakeTools::new();
    let (deps, key) = cached_track_deps(&tools);

    handle_music_callback(&tg.bot, &callback_query(&format!("music:{}", key)), &key, &deps)
        .await
        .unwrap();

    assert_eq!(
        tg.methods().await,
        vec!["answerCallbackQuery", "editMessageText", "sendAudio", "deleteMessage"]
    );
    assert!(tools.files().is_empty());
}
