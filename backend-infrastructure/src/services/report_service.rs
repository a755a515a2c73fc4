use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, FixedOffset, TimeZone};
use tokio::fs;
use tracing::{error, info};

use backend_application::queries::stats_queries;
use backend_application::AppState;
use backend_domain::utils::{reference_now, round1, today_string};
use backend_domain::StatisticsResult;

/// Writes the day's dashboard to disk at the configured local time, then
/// sleeps until the next cycle.
pub async fn schedule_reports(state: AppState) {
    loop {
        let next = next_report_time(&state);
        let now = reference_now(state.stats_config.utc_offset_hours);
        let duration = next.signed_duration_since(now);
        let sleep_ms = duration.num_milliseconds().max(0) as u64;
        tokio::time::sleep(std::time::Duration::from_millis(sleep_ms)).await;

        if let Err(err) = generate_daily_report(&state).await {
            error!("report generation failed: {}", err);
        }
    }
}

pub async fn generate_daily_report(state: &AppState) -> Result<()> {
    let stats = stats_queries::get_statistics(state).await;
    let date = today_string(&reference_now(state.stats_config.utc_offset_hours));

    let report_dir = Path::new(&state.config.report_dir);
    fs::create_dir_all(report_dir).await?;
    let path = report_dir.join(format!("{}.html", date));

    let html = render_report(&date, &stats);
    fs::write(&path, html).await?;
    info!(date = %date, "daily report written");

    if let Some(url) = &state.config.webhook_url {
        let link = format!("{}/reports/{}.html", state.config.public_base_url, date);
        let payload = fill_template(
            state.config.webhook_template.as_deref(),
            &date,
            &stats,
            &link,
        );
        send_webhook(url, payload).await?;
    }

    Ok(())
}

pub fn render_report(date: &str, stats: &StatisticsResult) -> String {
    let mut ranking_rows = String::new();
    for (position, player) in stats.rankings.iter().enumerate() {
        ranking_rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td class=\"num\">{}L</td><td class=\"num\">{}</td></tr>",
            position + 1,
            player.name,
            player.total_volume,
            player.total_quantity
        ));
    }

    let mut brand_rows = String::new();
    for brand in &stats.brand_stats {
        brand_rows.push_str(&format!(
            "<tr><td>{}</td><td class=\"num\">{}L</td><td class=\"num\">{}</td></tr>",
            brand.name, brand.volume, brand.quantity
        ));
    }

    let mut achievement_items = String::new();
    for achievement in &stats.achievements {
        achievement_items.push_str(&format!(
            "<li><strong>{}</strong> — {} <em>({})</em></li>",
            achievement.title, achievement.description, achievement.player
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
<meta charset="utf-8" />
<meta name="viewport" content="width=device-width, initial-scale=1" />
<title>Ivory Toast · {date}</title>
<style>
body {{
  margin: 0;
  font-family: "Source Sans 3", "IBM Plex Sans", sans-serif;
  background: #FFF8DC;
  color: #8B4513;
}}
.page {{ max-width: 900px; margin: 0 auto; padding: 24px 16px 40px; }}
h1 {{ text-align: center; }}
.progress-box {{
  background: #FFE4C4;
  border-radius: 12px;
  padding: 16px;
  margin-bottom: 24px;
}}
.bar {{
  height: 12px;
  border-radius: 6px;
  background: #ffffff;
  overflow: hidden;
}}
.bar span {{
  display: block;
  height: 100%;
  background: #DAA520;
  width: {progress}%;
}}
.cards {{
  display: grid;
  grid-template-columns: repeat(auto-fit, minmax(150px, 1fr));
  gap: 12px;
  margin-bottom: 24px;
}}
.card {{
  background: #ffffff;
  border-radius: 10px;
  padding: 12px;
  text-align: center;
}}
.card .value {{ font-size: 22px; font-weight: 700; color: #D2691E; }}
table {{ width: 100%; border-collapse: collapse; background: #ffffff; border-radius: 10px; }}
th, td {{ padding: 8px 10px; border-bottom: 1px solid #DEB887; text-align: left; }}
td.num {{ text-align: right; }}
section {{ margin-bottom: 24px; }}
</style>
</head>
<body>
<div class="page">
  <h1>🍺 Ivory Toast · {date}</h1>
  <div class="progress-box">
    <p>{beers} de {goal} cervezas ({percent}%)</p>
    <div class="bar"><span></span></div>
  </div>
  <div class="cards">
    <div class="card"><div>Total Litros</div><div class="value">{volume}L</div></div>
    <div class="card"><div>Total Cervezas</div><div class="value">{beers}</div></div>
    <div class="card"><div>Participantes</div><div class="value">{participants}</div></div>
    <div class="card"><div>Promedio L/Persona</div><div class="value">{average}L</div></div>
  </div>
  <section>
    <h2>🏆 Ranking</h2>
    <table>
      <thead><tr><th>#</th><th>Jugador</th><th>Litros</th><th>Cantidad</th></tr></thead>
      <tbody>{ranking_rows}</tbody>
    </table>
  </section>
  <section>
    <h2>🍻 Marcas</h2>
    <table>
      <thead><tr><th>Marca</th><th>Litros</th><th>Cantidad</th></tr></thead>
      <tbody>{brand_rows}</tbody>
    </table>
  </section>
  <section>
    <h2>🌟 Logros</h2>
    <ul>{achievement_items}</ul>
  </section>
</div>
</body>
</html>"#,
        date = date,
        progress = round1(stats.goal.progress_percent),
        beers = stats.summary.total_beers,
        goal = stats.goal.goal,
        percent = round1(stats.goal.progress_percent),
        volume = stats.summary.total_volume,
        participants = stats.summary.total_participants,
        average = stats.summary.average_beers,
        ranking_rows = ranking_rows,
        brand_rows = brand_rows,
        achievement_items = achievement_items,
    )
}

fn fill_template(
    template: Option<&str>,
    date: &str,
    stats: &StatisticsResult,
    link: &str,
) -> String {
    let template = template.unwrap_or(
        r#"{"message":"🍺 {date}: {beers} de {goal} cervezas ({percent}%) · {volume}L · {link}"}"#,
    );
    template
        .replace("{date}", date)
        .replace("{beers}", &stats.summary.total_beers.to_string())
        .replace("{goal}", &stats.goal.goal.to_string())
        .replace("{percent}", &round1(stats.goal.progress_percent).to_string())
        .replace("{volume}", &stats.summary.total_volume.to_string())
        .replace("{link}", link)
}

async fn send_webhook(url: &str, payload: String) -> Result<()> {
    let client = reqwest::Client::new();
    client
        .post(url)
        .header("Content-Type", "application/json")
        .body(payload)
        .send()
        .await?
        .error_for_status()?;
    Ok(())
}

fn next_report_time(state: &AppState) -> DateTime<FixedOffset> {
    let now = reference_now(state.stats_config.utc_offset_hours);
    let today = now.date_naive();
    let target = today
        .and_hms_opt(state.config.report_hour, state.config.report_minute, 0)
        .unwrap();
    let mut at = now.timezone().from_local_datetime(&target).unwrap();
    if at <= now {
        let next = today.succ_opt().unwrap();
        let next_target = next
            .and_hms_opt(state.config.report_hour, state.config.report_minute, 0)
            .unwrap();
        at = now.timezone().from_local_datetime(&next_target).unwrap();
    }
    at
}
