use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};

use crate::entities::{
    Achievement, BrandAggregate, ConsumptionEvent, DailyAggregate, FavoriteBrand, PlayerAggregate,
    StatisticsResult, StatsConfig, Summary, TeamGoalProgress,
};
use crate::utils::{round1, round2, DATE_FORMAT};
use crate::value_objects::BrandFilter;

/// Label used for team-wide achievement entries.
pub const TEAM_LABEL: &str = "Team";

const SECONDS_PER_DAY: f64 = 86_400.0;
const FAVORITE_BRAND_COUNT: usize = 3;

/// Maps the full event history to every derived view in one pass.
///
/// Pure and deterministic: `now` is an explicit argument (an instant in
/// the reference timezone), so two calls over the same inputs produce
/// identical results. Never fails; the worst case is a zero-filled
/// result over an empty list.
pub fn compute_statistics(
    events: &[ConsumptionEvent],
    config: &StatsConfig,
    now: DateTime<FixedOffset>,
) -> StatisticsResult {
    let rankings = player_rankings(events);
    let filter = BrandFilter::new(&config.excluded_brands);
    let brand_stats = brand_rankings(events, &filter);
    let daily_stats = daily_series(events);
    let summary = summarize(&rankings);
    let goal = goal_progress(&summary, config, now);
    let achievements =
        derive_achievements(&rankings, &brand_stats, &daily_stats, &summary, &goal, config, now);

    StatisticsResult {
        rankings,
        brand_stats,
        daily_stats,
        summary,
        goal,
        achievements,
    }
}

/// Group by player in first-seen order, then sort descending by volume.
/// The sort is stable, so players with equal totals keep discovery order.
fn player_rankings(events: &[ConsumptionEvent]) -> Vec<PlayerAggregate> {
    let mut order: Vec<PlayerAggregate> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for event in events {
        let slot = *index.entry(event.player.clone()).or_insert_with(|| {
            order.push(PlayerAggregate {
                name: event.player.clone(),
                total_volume: 0.0,
                total_quantity: 0,
            });
            order.len() - 1
        });
        order[slot].total_volume += event.effective_total_volume();
        order[slot].total_quantity += u64::from(event.effective_amount());
    }

    for player in &mut order {
        player.total_volume = round2(player.total_volume);
    }
    order.sort_by(|a, b| {
        b.total_volume
            .partial_cmp(&a.total_volume)
            .unwrap_or(Ordering::Equal)
    });
    order
}

/// Same reduction keyed by brand. Excluded catch-all buckets are dropped
/// from the output only; their events still count everywhere else.
fn brand_rankings(events: &[ConsumptionEvent], filter: &BrandFilter) -> Vec<BrandAggregate> {
    let mut order: Vec<BrandAggregate> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for event in events {
        let slot = *index.entry(event.brand.clone()).or_insert_with(|| {
            order.push(BrandAggregate {
                name: event.brand.clone(),
                volume: 0.0,
                quantity: 0,
            });
            order.len() - 1
        });
        order[slot].volume += event.effective_total_volume();
        order[slot].quantity += u64::from(event.effective_amount());
    }

    let mut out: Vec<BrandAggregate> = order
        .into_iter()
        .filter(|brand| !filter.is_excluded(&brand.name))
        .collect();
    for brand in &mut out {
        brand.volume = round2(brand.volume);
    }
    out.sort_by(|a, b| b.volume.partial_cmp(&a.volume).unwrap_or(Ordering::Equal));
    out
}

/// Per-day totals sorted ascending. Lexical comparison is enough for the
/// fixed-width `YYYY-MM-DD` format.
fn daily_series(events: &[ConsumptionEvent]) -> Vec<DailyAggregate> {
    let mut order: Vec<DailyAggregate> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for event in events {
        let slot = *index.entry(event.date.clone()).or_insert_with(|| {
            order.push(DailyAggregate {
                date: event.date.clone(),
                volume: 0.0,
                quantity: 0,
            });
            order.len() - 1
        });
        order[slot].volume += event.effective_total_volume();
        order[slot].quantity += u64::from(event.effective_amount());
    }

    for day in &mut order {
        day.volume = round2(day.volume);
    }
    order.sort_by(|a, b| a.date.cmp(&b.date));
    order
}

fn summarize(rankings: &[PlayerAggregate]) -> Summary {
    let total_beers = rankings.iter().map(|player| player.total_quantity).sum();
    let total_volume = round2(rankings.iter().map(|player| player.total_volume).sum());
    let total_participants = rankings.len() as u64;
    let average_beers = if total_participants == 0 {
        0.0
    } else {
        round2(total_volume / total_participants as f64)
    };

    Summary {
        total_beers,
        total_volume,
        total_participants,
        average_beers,
    }
}

fn goal_progress(
    summary: &Summary,
    config: &StatsConfig,
    now: DateTime<FixedOffset>,
) -> TeamGoalProgress {
    let total_beers = summary.total_beers;
    let raw_progress_percent = if config.goal_total == 0 {
        0.0
    } else {
        100.0 * total_beers as f64 / config.goal_total as f64
    };
    let beers_needed = config.goal_total as i64 - total_beers as i64;
    let days_left = days_until(config.deadline, now);
    let daily_pace_required = if days_left > 0 {
        (beers_needed as f64 / days_left as f64).ceil().max(0.0) as i64
    } else {
        0
    };
    let expected_progress_percent = expected_percent(config, now);

    TeamGoalProgress {
        goal: config.goal_total,
        deadline: config.deadline.format(DATE_FORMAT).to_string(),
        total_beers,
        progress_percent: raw_progress_percent.clamp(0.0, 100.0),
        raw_progress_percent,
        beers_needed,
        days_left,
        daily_pace_required,
        expected_progress_percent,
        ahead_of_schedule: raw_progress_percent > expected_progress_percent,
    }
}

/// Ceiling of real-valued days until the deadline's midnight, floored at 0.
fn days_until(deadline: NaiveDate, now: DateTime<FixedOffset>) -> i64 {
    let Some(midnight) = deadline.and_hms_opt(0, 0, 0) else {
        return 0;
    };
    let Some(deadline_at) = now.timezone().from_local_datetime(&midnight).single() else {
        return 0;
    };
    let seconds = (deadline_at - now).num_seconds();
    if seconds <= 0 {
        return 0;
    }
    (seconds as f64 / SECONDS_PER_DAY).ceil() as i64
}

/// Share of the planned window already elapsed, in percent.
fn expected_percent(config: &StatsConfig, now: DateTime<FixedOffset>) -> f64 {
    let total_planned = (config.deadline - config.start_date).num_days();
    if total_planned <= 0 {
        return 0.0;
    }
    let elapsed = (now.date_naive() - config.start_date)
        .num_days()
        .clamp(0, total_planned);
    100.0 * elapsed as f64 / total_planned as f64
}

fn derive_achievements(
    rankings: &[PlayerAggregate],
    brand_stats: &[BrandAggregate],
    daily_stats: &[DailyAggregate],
    summary: &Summary,
    goal: &TeamGoalProgress,
    config: &StatsConfig,
    now: DateTime<FixedOffset>,
) -> Vec<Achievement> {
    let mut achievements = Vec::new();

    achievements.push(Achievement {
        player: TEAM_LABEL.to_string(),
        title: "Meta del equipo 🎯".to_string(),
        description: format!(
            "{} de {} cervezas ({}%). Quedan {} días, ritmo necesario: {} por día.",
            goal.total_beers,
            goal.goal,
            round1(goal.progress_percent),
            goal.days_left,
            goal.daily_pace_required
        ),
    });

    if goal.ahead_of_schedule {
        achievements.push(Achievement {
            player: TEAM_LABEL.to_string(),
            title: "Adelantados al calendario 🚀".to_string(),
            description: format!(
                "{}% completado contra un {}% esperado a esta altura.",
                round1(goal.raw_progress_percent),
                round1(goal.expected_progress_percent)
            ),
        });
    }

    for player in rankings {
        if player.total_volume >= config.player_volume_threshold_l {
            achievements.push(Achievement {
                player: player.name.clone(),
                title: "Barril andante 🍺".to_string(),
                description: format!(
                    "{} ya acumula {}L registrados.",
                    player.name, player.total_volume
                ),
            });
        }
        if player.total_quantity >= config.player_count_threshold {
            achievements.push(Achievement {
                player: player.name.clone(),
                title: "Club de los cien 💯".to_string(),
                description: format!(
                    "{} superó las {} cervezas ({} registradas).",
                    player.name, config.player_count_threshold, player.total_quantity
                ),
            });
        }
    }

    if summary.total_volume >= config.team_volume_threshold_l {
        achievements.push(Achievement {
            player: TEAM_LABEL.to_string(),
            title: "Piscina de cerveza 🌊".to_string(),
            description: format!("El equipo acumula {}L en total.", summary.total_volume),
        });
    }

    // "Today" comes from the engine's clock argument, in the reference
    // timezone. A day with no aggregate simply emits nothing.
    let today = now.format(DATE_FORMAT).to_string();
    if let Some(day) = daily_stats.iter().find(|day| day.date == today) {
        if day.volume >= config.hot_streak_threshold_l {
            achievements.push(Achievement {
                player: TEAM_LABEL.to_string(),
                title: "Racha caliente 🔥".to_string(),
                description: format!("Hoy ya van {}L.", day.volume),
            });
        }
    }

    if !brand_stats.is_empty() {
        let shares: Vec<String> = brand_stats
            .iter()
            .take(FAVORITE_BRAND_COUNT)
            .map(|brand| {
                let share = if summary.total_volume > 0.0 {
                    100.0 * brand.volume / summary.total_volume
                } else {
                    0.0
                };
                format!("{} ({}%)", brand.name, round1(share))
            })
            .collect();
        achievements.push(Achievement {
            player: TEAM_LABEL.to_string(),
            title: "Favoritas del equipo 🍻".to_string(),
            description: format!("Top marcas: {}.", shares.join(", ")),
        });
    }

    achievements
}

/// The brand this player has drunk the most of, catch-all buckets
/// excluded. Ties keep the first brand encountered.
pub fn favorite_brand(
    events: &[ConsumptionEvent],
    player: &str,
    filter: &BrandFilter,
) -> Option<FavoriteBrand> {
    let mut order: Vec<FavoriteBrand> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for event in events.iter().filter(|event| event.player == player) {
        if filter.is_excluded(&event.brand) {
            continue;
        }
        let slot = *index.entry(event.brand.clone()).or_insert_with(|| {
            order.push(FavoriteBrand {
                name: event.brand.clone(),
                volume: 0.0,
                quantity: 0,
            });
            order.len() - 1
        });
        order[slot].volume += event.effective_total_volume();
        order[slot].quantity += u64::from(event.effective_amount());
    }

    let mut best: Option<FavoriteBrand> = None;
    for mut brand in order {
        brand.volume = round2(brand.volume);
        let better = best
            .as_ref()
            .map_or(true, |current| brand.volume > current.volume);
        if better {
            best = Some(brand);
        }
    }
    best
}

/// The player's most recent timestamped event. Legacy rows without a
/// timestamp never qualify.
pub fn last_record<'a>(
    events: &'a [ConsumptionEvent],
    player: &str,
) -> Option<&'a ConsumptionEvent> {
    events
        .iter()
        .filter(|event| event.player == player && event.timestamp.is_some())
        .max_by_key(|event| event.timestamp)
}
