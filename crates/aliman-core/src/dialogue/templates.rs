//! Canned reply texts.
//!
//! Every function here is total: any string argument yields a reply.

use indoc::{formatdoc, indoc};

/// Minutes the user is asked to hold on after a distraction.
pub const DISTRACTION_FOLLOW_UP_MINUTES: u32 = 10;

pub fn exit_distraction(reason: &str) -> String {
    let minutes = DISTRACTION_FOLLOW_UP_MINUTES;
    formatdoc!(
        "
        ⚠️ \"{reason}\" — bu chalg'itish!

        Eslab qo'y: har safar fokusni yo'qotganingda, maqsadingga erishish qiyinlashadi. Ulug' insonlar ham zerikadi, lekin ular davom etadi!

        💪 Yana {minutes} daqiqa tur. Faqat {minutes} daqiqa! Keyin ko'rasan — engib o'tasan.",
        reason = reason,
        minutes = minutes,
    )
}

pub fn exit_valid(reason: &str) -> String {
    formatdoc!(
        "
        ✅ \"{reason}\" — tushunarli sabab.

        Tez hal qilib, qaytib kel. Fokusingni yo'qotma — qaytganingda davom ettirishni unutma!",
        reason = reason,
    )
}

pub fn exit_unknown(reason: &str) -> String {
    formatdoc!(
        "
        🤔 \"{reason}\" — baribir, endi fokusga qaytish vaqti!

        Maqsadingni esla va davom et. 💡 Maslahat: telefon/ijtimoiy tarmoqlarni boshqa xonaga qo'y — ko'zdan uzoq, ko'ngildan uzoq!",
        reason = reason,
    )
}

pub fn focus_stay() -> String {
    indoc!(
        "
        🔒 Fokus rejimida ekansiz!

        Agar haqiqatan zarur bo'lsa — chiq. Lekin shunchaki zerikayotgan bo'lsang — dosh ber! 5 daqiqa davom ettir, keyin qaror qil. 💪"
    )
    .to_string()
}

pub fn focus_keep_going(username: &str) -> String {
    formatdoc!(
        "
        Fokusda davom et, {username}! 🎯
        Hozir eng muhim narsa — oldingdagi vazifa.",
        username = username,
    )
}

pub fn greeting(username: &str) -> String {
    format!("Salom, {username}! 👋 Bugun nima qilmoqchisan? Birgalikda rejalashtiramiz!")
}

pub fn boredom(username: &str) -> String {
    formatdoc!(
        "
        Tushunaman, {username}, ba'zida qiyin bo'ladi. 🤗

        Lekin zerikish — bu o'sish chegarasida turganingning belgisi! Har bir buyuk ish boshida zerikarli ko'rinadi.

        💡 Vazifangni 5 daqiqalik bo'laklarga bo'l va boshla. Ko'pincha boshlash eng qiyin qism!",
        username = username,
    )
}

pub fn planning(username: &str) -> String {
    formatdoc!(
        "
        Keling rejalashtiramiz, {username}! 📋

        Bugun uchun 3 ta asosiy maqsad yoz:
        1. Eng muhim vazifa nima?
        2. Ikkinchi muhim vazifa?
        3. Uchinchi?

        Rejangni 'Reja' bo'limiga yoz!",
        username = username,
    )
}

pub fn help(username: &str) -> String {
    formatdoc!(
        "
        {username}, men seni fokus bo'lishga yordam beraman! 🎯

        • Bugungi rejani tuzishga yordam
        • Fokus sessiyasini boshqarish
        • Chalg'ituvchi vaqtlarni nazorat qilish
        • Kun yakuni tahlil

        Nima haqida gaplashamiz?",
        username = username,
    )
}

pub fn encouragement(username: &str) -> String {
    formatdoc!(
        "
        Tushundim, {username}. 💪

        Fokusda qolish uchun doim qo'llab-quvvatlayman! Biror savol yoki muammo bo'lsa, bemalol so'ra.",
        username = username,
    )
}

pub const MORNING_QUESTION: &str =
    "🌅 Xayrli tong! Bugun nima qilmoqchisan? Rejangni yoz va fokuslanib boshla.";
pub const AFTERNOON_QUESTION: &str =
    "☀️ Tushdan keyin ham davom et! Bugun qanday natijaga erishmoqchisan?";
pub const EVENING_QUESTION: &str =
    "🌙 Kechqi vaqt — eng samarali vaqtlardan biri! Bugun nima qilmoqchisan?";
