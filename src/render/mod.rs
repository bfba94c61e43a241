//! HTML rendering for the showcase page.
//!
//! The page is a single self-contained document: inline stylesheet, no
//! scripts. Every interpolated value goes through [`escape`].

use crate::config::PageConfig;
use crate::models::{EnrichedAchievement, GameSummary, Showcase};

/// Achievements listed per game card.
pub const ACHIEVEMENTS_PER_CARD: usize = 3;

const STYLE: &str = r#"
* { box-sizing: border-box; }
body { margin: 0; font-family: system-ui, -apple-system, "Segoe UI", sans-serif; background: #f1f5f9; color: #0f172a; }
a { color: inherit; }
.hero { background: linear-gradient(90deg, #0f172a, #3730a3, #0284c7); color: #fff; padding: 56px 24px 72px; }
.wrap { max-width: 1152px; margin: 0 auto; }
.hero .wrap { display: flex; flex-wrap: wrap; gap: 48px; align-items: center; }
.identity { display: flex; gap: 24px; align-items: flex-start; flex: 1 1 480px; }
.avatar { width: 96px; height: 96px; border-radius: 24px; object-fit: cover; border: 3px solid rgba(255,255,255,.3); }
.badge { display: inline-block; border-radius: 999px; background: rgba(255,255,255,.1); padding: 4px 12px; font-size: 12px; font-weight: 600; letter-spacing: .2em; text-transform: uppercase; }
h1 { font-size: 44px; font-weight: 900; margin: 12px 0; }
.lead { font-size: 18px; opacity: .9; max-width: 640px; }
.button { display: inline-block; border-radius: 999px; background: #fff; color: #0f172a; padding: 8px 16px; font-weight: 600; text-decoration: none; }
.tiles { display: grid; grid-template-columns: repeat(3, 1fr); gap: 16px; flex: 1 1 420px; }
.tile { border-radius: 16px; background: rgba(255,255,255,.1); padding: 20px 16px; }
.tile .label { font-size: 12px; letter-spacing: .2em; text-transform: uppercase; margin: 0; }
.tile .value { font-size: 30px; font-weight: 800; margin: 8px 0 0; }
.tile .hint { font-size: 14px; opacity: .8; margin: 0; }
main.wrap { padding: 0 24px; margin-top: -32px; }
.notice { border-radius: 16px; background: #fffbeb; border: 1px solid #fde68a; color: #78350f; padding: 16px; margin-bottom: 32px; }
.layout { display: grid; grid-template-columns: 1.2fr .8fr; gap: 32px; }
.panel { border-radius: 24px; background: #fff; padding: 32px; box-shadow: 0 10px 30px rgba(15,23,42,.08); }
.games { display: grid; grid-template-columns: repeat(2, 1fr); gap: 16px; margin-top: 24px; }
.game { border-radius: 16px; border: 1px solid #f1f5f9; background: #f8fafc; padding: 20px; }
.game h3 { margin: 0; font-size: 20px; }
.game .playtime { color: #64748b; font-size: 14px; margin: 4px 0 0; }
.count { border-radius: 999px; background: #fff; padding: 4px 12px; font-size: 12px; font-weight: 600; }
.achievement { display: flex; gap: 12px; border-radius: 12px; background: #fff; padding: 12px; margin-top: 12px; }
.achievement img, .achievement .icon-placeholder { width: 48px; height: 48px; border-radius: 8px; object-fit: cover; flex: none; }
.icon-placeholder { background: #e2e8f0; }
.achievement .name { font-size: 14px; font-weight: 600; margin: 0; }
.achievement .description { font-size: 12px; color: #475569; margin: 4px 0 0; }
dl { display: grid; grid-template-columns: repeat(2, 1fr); gap: 12px; }
dl div { border-radius: 16px; background: #f8fafc; padding: 12px; }
dt { font-weight: 600; }
dd { margin: 0; }
.invite { border-radius: 24px; background: linear-gradient(135deg, #0f172a, #312e81, #075985); color: #fff; padding: 24px; margin-top: 16px; }
footer { margin-top: 64px; border-top: 1px solid #e2e8f0; background: rgba(255,255,255,.8); padding: 24px; text-align: center; font-size: 14px; color: #64748b; }
@media (max-width: 900px) { .layout, .games { grid-template-columns: 1fr; } .tiles { grid-template-columns: 1fr; } }
"#;

/// Escape text for HTML element and attribute content.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Group digits in threes with `.`, as in `id-ID`.
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

/// Playtime in hours, one decimal, Indonesian number format.
///
/// `0` → `"0 jam"`, `4600` → `"76,7 jam"`, `90000` → `"1.500 jam"`.
pub fn format_playtime(minutes: u64) -> String {
    // Tenths of an hour, rounded half up
    let tenths = (minutes + 3) / 6;
    let (whole, fraction) = (tenths / 10, tenths % 10);

    if fraction == 0 {
        format!("{} jam", group_thousands(whole))
    } else {
        format!("{},{} jam", group_thousands(whole), fraction)
    }
}

fn render_achievement(achievement: &EnrichedAchievement) -> String {
    let icon = match achievement.icon.as_deref() {
        Some(src) => format!(
            r#"<img src="{}" alt="{}" width="48" height="48" loading="lazy">"#,
            escape(src),
            escape(&achievement.name)
        ),
        None => r#"<div class="icon-placeholder" aria-hidden="true"></div>"#.to_string(),
    };

    format!(
        r#"<div class="achievement">{icon}<div><p class="name">{name}</p><p class="description">{description}</p></div></div>"#,
        icon = icon,
        name = escape(&achievement.name),
        description = escape(&achievement.description),
    )
}

fn render_game(game: &GameSummary) -> String {
    let achievements: String = game
        .achievements
        .iter()
        .take(ACHIEVEMENTS_PER_CARD)
        .map(render_achievement)
        .collect();

    format!(
        r#"<article class="game" data-app-id="{app_id}">
  <div style="display:flex;justify-content:space-between;gap:12px">
    <div><h3>{name}</h3><p class="playtime">{playtime} dimainkan</p></div>
    <span class="count">{count} pencapaian</span>
  </div>
  {achievements}
</article>"#,
        app_id = game.app_id,
        name = escape(&game.name),
        playtime = format_playtime(game.playtime_minutes),
        count = game.achievements.len(),
        achievements = achievements,
    )
}

/// Render the full page for one showcase.
pub fn render_page(showcase: &Showcase, page: &PageConfig, year: i32) -> String {
    let profile = &showcase.profile;
    let profile_url = escape(&profile.profile_url);

    let notice = if showcase.configuration_notice {
        r#"<div class="notice" role="status">Tidak ada data Steam yang bisa diambil. Pastikan API key dan Steam ID sudah diisi di environment variable, lalu jalankan ulang server.</div>"#
    } else {
        ""
    };

    let games: String = showcase.games.iter().map(render_game).collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="id">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{persona} · Steam Profile Showcase</title>
<style>{style}</style>
</head>
<body>
<header class="hero">
  <div class="wrap">
    <div class="identity">
      <img class="avatar" src="{avatar}" alt="Steam Avatar" width="96" height="96">
      <div>
        <span class="badge">Steam Profile</span>
        <h1>Halo, saya {persona}</h1>
        <p class="lead">Pemrogram dan gamer yang senang bereksperimen dengan API, membangun tampilan yang rapi, serta mengajak teman-teman untuk berbagi pencapaian.</p>
        <a class="button" href="{profile_url}" target="_blank" rel="noreferrer">Lihat Profil Steam <span aria-hidden="true">↗</span></a>
      </div>
    </div>
    <div class="tiles">
      <div class="tile"><p class="label">Total Game</p><p class="value" id="games-count">{games_shown}</p><p class="hint">Yang sedang dipantau</p></div>
      <div class="tile"><p class="label">Achievement</p><p class="value" id="achievement-count">{total_achievements}</p><p class="hint">Yang berhasil dikunci</p></div>
      <div class="tile"><p class="label">Jam Main</p><p class="value" id="playtime">{playtime}</p><p class="hint">Estimasi total</p></div>
    </div>
  </div>
</header>
<main class="wrap">
  {notice}
  <section class="layout">
    <div class="panel">
      <p style="margin:0;color:#64748b;font-weight:600">Game Favorit</p>
      <h2 style="margin:0;font-size:30px;font-weight:900">Statistik Teratas</h2>
      <div class="games">
{games}
      </div>
    </div>
    <div>
      <div class="panel">
        <h2 style="margin:0">Bio Singkat</h2>
        <p style="color:#475569;line-height:1.6">&quot;{bio}&quot;</p>
        <dl>
          <div><dt>Nama</dt><dd>{display_name}</dd></div>
          <div><dt>Lokasi</dt><dd>{location}</dd></div>
          <div><dt>Koneksi</dt><dd>Online siap mabar</dd></div>
          <div><dt>Bahasa</dt><dd>{languages}</dd></div>
        </dl>
      </div>
      <div class="invite">
        <h3 style="margin:0">Tambah Teman</h3>
        <p style="font-size:14px;opacity:.9">Klik tombol di bawah untuk membuka profil Steam dan kirim undangan pertemanan.</p>
        <a class="button" href="{profile_url}" target="_blank" rel="noreferrer">Buka Steam <span aria-hidden="true">↗</span></a>
      </div>
    </div>
  </section>
</main>
<footer>&copy; {year} Steam Profile Showcase · Data dari Steam Web API</footer>
</body>
</html>
"#,
        style = STYLE,
        persona = escape(&profile.persona_name),
        avatar = escape(&profile.avatar_url),
        profile_url = profile_url,
        games_shown = showcase.totals.games_shown,
        total_achievements = showcase.totals.total_achievements,
        playtime = format_playtime(showcase.totals.total_playtime_minutes),
        notice = notice,
        games = games,
        bio = escape(&page.bio),
        display_name = escape(profile.display_name()),
        location = escape(profile.location()),
        languages = escape(&page.languages),
        year = year,
    )
}
