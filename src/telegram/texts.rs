//! User-facing texts (Uzbek)
//!
//! Builders that interpolate user data return MarkdownV2 with the data
//! already escaped.

use crate::core::config;
use crate::core::utils::{escape_markdown_v2, truncate_chars};

pub const START_GREETING: &str = "🎵 Salom! Men ko'p funksiyali botman:\n\n\
🎶 Musiqa qidirish — qo'shiq yoki qo'shiqchi nomini yozing\n\
📸 Instagram yuklab olish — Instagram linkini yuboring\n\n\
Boshlash uchun qo'shiq nomini yoki Instagram linkini yuboring! 🚀";

// Instagram flow
pub const INSTAGRAM_LOADING: &str = "Yuklanmoqda... ⏳";
pub const INSTAGRAM_CAPTION: &str = "Mana faylingiz! 📥";
pub const REELS_AUDIO_CAPTION: &str = "🎵 Videodagi musiqa";
pub const INSTAGRAM_SEND_FAILED: &str = "Faylni yuborishda xatolik bo'ldi. 😕";
pub const INSTAGRAM_DOWNLOAD_FAILED: &str =
    "Kechirasiz, bu linkdan yuklab bo'lmadi.\nLink to'g'riligini yoki profil ochiqligini tekshiring. 🔒";

// Music flow
pub const SEARCHING: &str = "🔍 Qidirilmoqda...";
pub const NOTHING_FOUND: &str = "😕 Hech narsa topilmadi. Boshqa so'z bilan qidirib ko'ring.";
pub const SEARCH_EXPIRED: &str = "⏰ Qidiruv eskirgan. Qaytadan qidiring.";
pub const TRACK_LOADING: &str = "⏳ Yuklanmoqda...";
pub const TRACK_CAPTION: &str = "🎵 Mana qo'shigingiz!";
pub const TRACK_SEND_FAILED: &str = "😕 Audio yuborishda xatolik bo'ldi.";
pub const TRACK_DOWNLOAD_FAILED: &str = "😕 Bu qo'shiqni yuklab bo'lmadi. Boshqasini tanlang.";

/// Header above the result keyboard, query in bold.
pub fn search_results_header(query: &str) -> String {
    format!(
        "🎶 *\"{}\"* {}",
        escape_markdown_v2(query),
        escape_markdown_v2("bo'yicha natijalar:\n\nYuklash uchun qo'shiqni tanlang 👇")
    )
}

/// Button label: `🎵 <title> [<duration>]`
pub fn result_button_label(title: &str, duration: &str) -> String {
    format!(
        "🎵 {} [{}]",
        truncate_chars(title, config::search::BUTTON_TITLE_MAX_CHARS),
        duration
    )
}

/// Status shown while a chosen track downloads, title in bold.
pub fn track_downloading(title: &str) -> String {
    format!(
        "⏳ Yuklanmoqda: *{}*\\.\\.\\.",
        escape_markdown_v2(&truncate_chars(title, config::search::NOTICE_TITLE_MAX_CHARS))
    )
}
