//! Stride CLI - personal goal tracking with adaptive check-ins.

use anyhow::Result;
use clap::{Parser, Subcommand};
use stride_core::{GoalFrequency, GoalId, GoalStatus, GoalType, ObstacleId, ReviewRating};
use stride_engine::{CreateGoalInput, GoalFilter, GoalService, GoalUpdate, ReviewInput};
use stride_i18n::{translate, Locale};
use stride_storage::{paths, JsonStorage, Storage};
use tracing::Level;

#[derive(Parser)]
#[command(name = "stride")]
#[command(about = "Track personal goals with adaptive review scheduling", long_about = None)]
struct Cli {
    /// Data directory
    #[arg(long, default_value = "~/.stride")]
    data_dir: String,

    /// User id
    #[arg(long, default_value = "default")]
    user: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new goal
    Add {
        /// Goal title
        title: String,
        /// Why this goal matters
        #[arg(long)]
        why: String,
        /// habit | milestone | measurable
        #[arg(long, default_value = "habit")]
        r#type: String,
        /// daily | weekly | monthly | quarterly | yearly
        #[arg(long, default_value = "weekly")]
        frequency: String,
        /// Target amount per period
        #[arg(long, default_value = "1")]
        target: f64,
        /// Unit for the target
        #[arg(long, default_value = "times")]
        unit: String,
        /// Identity statement
        #[arg(long)]
        identity: Option<String>,
        /// Parent goal id
        #[arg(long)]
        parent: Option<String>,
        /// Tags (repeatable)
        #[arg(long)]
        tag: Vec<String>,
        /// Prerequisite goal ids (repeatable)
        #[arg(long)]
        requires: Vec<String>,
    },
    /// List goals
    List {
        /// Filter by status
        #[arg(long)]
        status: Option<String>,
        /// Filter by tag
        #[arg(long)]
        tag: Vec<String>,
    },
    /// Show goal details
    Show {
        /// Goal id
        id: String,
    },
    /// Edit goal fields
    Update {
        /// Goal id
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        why: Option<String>,
        #[arg(long)]
        target: Option<f64>,
        #[arg(long)]
        unit: Option<String>,
        /// Explicit status override
        #[arg(long)]
        status: Option<String>,
    },
    /// Delete a goal
    Delete {
        /// Goal id
        id: String,
    },
    /// Log a review against a goal
    Review {
        /// Goal id
        id: String,
        /// struggling | slow | on-track | exceeding
        #[arg(long, default_value = "on-track")]
        rating: String,
        /// What actually happened
        #[arg(long, default_value = "")]
        evidence: String,
        /// Value, for measurable goals
        #[arg(long)]
        value: Option<f64>,
        /// Backdate the review (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
        /// A win worth remembering (repeatable)
        #[arg(long)]
        win: Vec<String>,
    },
    /// Show review history for a goal
    History {
        /// Goal id
        id: String,
        #[arg(long, default_value = "10")]
        limit: usize,
    },
    /// Mark a goal achieved
    Achieve {
        /// Goal id
        id: String,
    },
    /// Promote every goal whose prerequisites are met
    Unlock,
    /// Show the goal most in need of a check-in
    Next,
    /// Capture, resolve, or list obstacles
    Obstacle {
        #[command(subcommand)]
        action: ObstacleAction,
    },
    /// Run analyzers and print risks, target suggestions, and patterns
    Insights,
    /// Print a coaching digest for a goal
    Coach {
        /// Goal id
        id: String,
    },
    /// Show or change preferences
    Prefs {
        /// en | es
        #[arg(long)]
        locale: Option<String>,
        /// IANA timezone name
        #[arg(long)]
        timezone: Option<String>,
        /// Display name
        #[arg(long)]
        name: Option<String>,
    },
}

#[derive(Subcommand)]
enum ObstacleAction {
    /// Capture an obstacle against a goal
    Add {
        /// Goal id
        id: String,
        /// What the obstacle is
        description: String,
    },
    /// Mark an obstacle resolved
    Resolve {
        /// Obstacle id
        obstacle_id: String,
    },
    /// List open obstacles for a goal
    List {
        /// Goal id
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::WARN)
        .init();

    let cli = Cli::parse();
    let now = chrono::Utc::now();
    let user = cli.user.clone();

    let root = paths::expand_path(&cli.data_dir);
    let storage = JsonStorage::new(root);
    let prefs = storage.load_preferences(&user).await?;
    let locale = prefs.locale;

    let mut service = GoalService::new(storage);

    match cli.command {
        Commands::Add {
            title,
            why,
            r#type,
            frequency,
            target,
            unit,
            identity,
            parent,
            tag,
            requires,
        } => {
            let input = CreateGoalInput {
                title,
                goal_type: parse_type(&r#type)?,
                frequency: parse_frequency(&frequency)?,
                target,
                unit,
                why,
                description: None,
                identity,
                parent_id: parent.map(GoalId::from),
                tags: tag,
                prerequisites: requires.into_iter().map(GoalId::from).collect(),
            };
            let goal = service.create_goal(&user, input, now).await?;
            println!(
                "{}",
                translate(locale, "goals.created", &[("title", goal.title.clone())])
            );
            println!("  id: {}", goal.id);
            println!("  status: {}", status_label(locale, goal.status));
            if let Some(date) = goal.next_check_in {
                println!(
                    "  {}",
                    translate(locale, "review.nextCheckIn", &[("date", date.to_string())])
                );
            }
        }
        Commands::List { status, tag } => {
            let filter = GoalFilter {
                status: status.as_deref().map(parse_status).transpose()?,
                tags: tag,
                parent_id: None,
            };
            let goals = service.list_goals(&user, &filter).await?;
            if goals.is_empty() {
                println!("{}", translate(locale, "goals.listEmpty", &[]));
                return Ok(());
            }
            println!(
                "{}",
                translate(locale, "goals.listHeader", &[("count", goals.len().to_string())])
            );
            for goal in goals {
                println!(
                    "  {} | {} | {}/{} {} | {}",
                    goal.id,
                    status_label(locale, goal.status),
                    goal.progress,
                    goal.target,
                    goal.unit,
                    goal.title,
                );
            }
        }
        Commands::Show { id } => {
            let goal = service.get_goal(&user, &GoalId::from(id)).await?;
            println!("{} ({})", goal.title, goal.id);
            println!("  why: {}", goal.why);
            println!("  status: {}", status_label(locale, goal.status));
            println!("  progress: {}/{} {}", goal.progress, goal.target, goal.unit);
            println!("  maturity: {}/{}", goal.maturity, stride_core::Goal::MAX_MATURITY);
            if let Some(date) = goal.last_review {
                println!("  last review: {date}");
            }
            if let Some(date) = goal.next_check_in {
                println!("  next check-in: {date}");
            }
            if !goal.prerequisites.is_empty() {
                println!(
                    "  requires: {}",
                    goal.prerequisites
                        .iter()
                        .map(|p| p.to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                );
            }
        }
        Commands::Update {
            id,
            title,
            why,
            target,
            unit,
            status,
        } => {
            let updates = GoalUpdate {
                title,
                why,
                target,
                unit,
                status: status.as_deref().map(parse_status).transpose()?,
                ..Default::default()
            };
            let goal = service
                .update_goal(&user, &GoalId::from(id), updates, now)
                .await?;
            println!(
                "{}",
                translate(locale, "goals.updated", &[("title", goal.title)])
            );
        }
        Commands::Delete { id } => {
            let id = GoalId::from(id);
            let goal = service.get_goal(&user, &id).await?;
            service.delete_goal(&user, &id, now).await?;
            println!(
                "{}",
                translate(locale, "goals.deleted", &[("title", goal.title)])
            );
        }
        Commands::Review {
            id,
            rating,
            evidence,
            value,
            date,
            win,
        } => {
            let input = ReviewInput {
                goal_id: GoalId::from(id),
                rating: parse_rating(&rating)?,
                evidence,
                value,
                obstacles: None,
                wins: if win.is_empty() { None } else { Some(win) },
                date: date.map(|d| d.parse()).transpose()?,
            };
            let outcome = service.submit_review(&user, input, now).await?;
            let summary = &outcome.summary;
            let period = period_label(locale, outcome.goal.frequency);

            println!("{}", translate(locale, "review.registered", &[]));
            println!(
                "{}",
                translate(
                    locale,
                    "review.periodProgress",
                    &[
                        ("current", summary.current.to_string()),
                        ("target", summary.target.to_string()),
                        ("unit", outcome.goal.unit.clone()),
                        ("period", period.to_string()),
                    ],
                )
            );
            if summary.streak > 1 {
                println!(
                    "{}",
                    translate(
                        locale,
                        "review.streak",
                        &[
                            ("count", summary.streak.to_string()),
                            ("period", period_label_plural(locale, outcome.goal.frequency).to_string()),
                        ],
                    )
                );
            }
            if summary.current == summary.target - 1.0 {
                println!(
                    "{}",
                    translate(locale, "review.oneMoreToComplete", &[("period", period.to_string())])
                );
            } else if summary.current >= summary.target {
                println!(
                    "{}",
                    translate(
                        locale,
                        "review.periodCompleted",
                        &[("period", period.to_uppercase())],
                    )
                );
            }
            if summary.maturity_increased {
                println!(
                    "{}",
                    translate(
                        locale,
                        "review.maturityUp",
                        &[("level", outcome.goal.maturity.to_string())],
                    )
                );
            }
            println!(
                "{} {}",
                translate(locale, "review.rememberWhy", &[]),
                outcome.goal.why
            );
            if let Some(date) = outcome.goal.next_check_in {
                println!(
                    "{}",
                    translate(locale, "review.nextCheckIn", &[("date", date.to_string())])
                );
            }
        }
        Commands::History { id, limit } => {
            let reviews = service
                .review_history(&user, &GoalId::from(id), limit)
                .await?;
            for review in reviews {
                let value = review
                    .value
                    .map(|v| format!(" ({v})"))
                    .unwrap_or_default();
                println!(
                    "  {} | {}{} | {}",
                    review.date,
                    rating_label(review.rating),
                    value,
                    review.evidence,
                );
            }
        }
        Commands::Achieve { id } => {
            let result = service.achieve_goal(&user, &GoalId::from(id), now).await?;
            println!(
                "{}",
                translate(locale, "goals.achieved", &[("title", result.goal.title)])
            );
            if !result.unlocked.is_empty() {
                let titles = result
                    .unlocked
                    .iter()
                    .map(|g| g.title.clone())
                    .collect::<Vec<_>>()
                    .join(", ");
                println!(
                    "{}",
                    translate(locale, "goals.unlocked", &[("titles", titles)])
                );
            }
        }
        Commands::Unlock => {
            let unlocked = service.run_unlock_sweep(&user, now).await?;
            if unlocked.is_empty() {
                println!("{}", translate(locale, "goals.noGoalsToUnlock", &[]));
            } else {
                let titles = unlocked
                    .iter()
                    .map(|g| g.title.clone())
                    .collect::<Vec<_>>()
                    .join(", ");
                println!(
                    "{}",
                    translate(locale, "goals.unlocked", &[("titles", titles)])
                );
            }
        }
        Commands::Next => {
            match service.next_goal_needing_attention(&user, now).await? {
                Some(goal) => println!(
                    "{}",
                    translate(locale, "goals.nextGoal", &[("title", goal.title)])
                ),
                None => println!("{}", translate(locale, "goals.noGoalsNeedAttention", &[])),
            }
        }
        Commands::Obstacle { action } => match action {
            ObstacleAction::Add { id, description } => {
                let obstacle = service
                    .capture_obstacle(&user, &GoalId::from(id), description, now)
                    .await?;
                println!(
                    "{} ({})",
                    translate(locale, "obstacles.captured", &[]),
                    obstacle.id
                );
            }
            ObstacleAction::Resolve { obstacle_id } => {
                let obstacle_id: ObstacleId = obstacle_id
                    .parse()
                    .map_err(|_| anyhow::anyhow!("invalid obstacle id"))?;
                service.resolve_obstacle(&user, obstacle_id, now).await?;
                println!("{}", translate(locale, "obstacles.resolved", &[]));
            }
            ObstacleAction::List { id } => {
                for obstacle in service.open_obstacles(&user, &GoalId::from(id)).await? {
                    println!("  {} | {}", obstacle.id, obstacle.description);
                }
            }
        },
        Commands::Insights => {
            let patterns =
                stride_insights::analyze_patterns(service.storage_mut(), &user, now).await?;

            let risks = stride_insights::predict_risks(service.storage(), &user, now).await?;
            if !risks.is_empty() {
                println!("Risks:");
                for risk in risks {
                    println!("  [{}] {} - {}", risk.risk_level, risk.goal_title, risk.reason);
                    println!("        {}", risk.suggestion);
                }
            }

            let suggestions =
                stride_insights::analyze_targets(service.storage(), &user, now).await?;
            if !suggestions.is_empty() {
                println!("Target suggestions:");
                for s in suggestions {
                    println!(
                        "  {} | {} -> {} {} ({})",
                        s.goal_title, s.current_target, s.suggested_target, s.unit, s.reason
                    );
                }
            }

            if !patterns.is_empty() {
                println!("Patterns:");
                for pattern in patterns {
                    println!("  {}", pattern.description);
                }
            }
        }
        Commands::Coach { id } => {
            let text = stride_insights::generate_coaching(
                service.storage(),
                &user,
                &GoalId::from(id),
                locale,
                now,
            )
            .await?;
            println!("{text}");
        }
        Commands::Prefs {
            locale: new_locale,
            timezone,
            name,
        } => {
            let mut prefs = prefs;
            if new_locale.is_none() && timezone.is_none() && name.is_none() {
                println!("  locale: {:?}", prefs.locale);
                println!("  timezone: {}", prefs.timezone);
                if let Some(name) = &prefs.name {
                    println!("  name: {name}");
                }
                return Ok(());
            }
            if let Some(l) = new_locale {
                prefs.locale = l.parse::<Locale>().map_err(|e| anyhow::anyhow!(e))?;
            }
            if let Some(tz) = timezone {
                prefs.timezone = tz;
            }
            if let Some(n) = name {
                prefs.name = Some(n);
            }
            service.storage_mut().save_preferences(&user, &prefs).await?;
            println!("Preferences saved.");
        }
    }

    Ok(())
}

fn parse_type(s: &str) -> Result<GoalType> {
    match s {
        "habit" => Ok(GoalType::Habit),
        "milestone" => Ok(GoalType::Milestone),
        "measurable" => Ok(GoalType::Measurable),
        other => anyhow::bail!("unknown goal type: {other}"),
    }
}

fn parse_frequency(s: &str) -> Result<GoalFrequency> {
    match s {
        "daily" => Ok(GoalFrequency::Daily),
        "weekly" => Ok(GoalFrequency::Weekly),
        "monthly" => Ok(GoalFrequency::Monthly),
        "quarterly" => Ok(GoalFrequency::Quarterly),
        "yearly" => Ok(GoalFrequency::Yearly),
        other => anyhow::bail!("unknown frequency: {other}"),
    }
}

fn parse_status(s: &str) -> Result<GoalStatus> {
    match s {
        "locked" => Ok(GoalStatus::Locked),
        "available" => Ok(GoalStatus::Available),
        "active" => Ok(GoalStatus::Active),
        "paused" => Ok(GoalStatus::Paused),
        "achieved" => Ok(GoalStatus::Achieved),
        other => anyhow::bail!("unknown status: {other}"),
    }
}

fn parse_rating(s: &str) -> Result<ReviewRating> {
    match s {
        "struggling" => Ok(ReviewRating::Struggling),
        "slow" => Ok(ReviewRating::Slow),
        "on-track" => Ok(ReviewRating::OnTrack),
        "exceeding" => Ok(ReviewRating::Exceeding),
        other => anyhow::bail!("unknown rating: {other}"),
    }
}

fn rating_label(rating: ReviewRating) -> &'static str {
    match rating {
        ReviewRating::Struggling => "struggling",
        ReviewRating::Slow => "slow",
        ReviewRating::OnTrack => "on-track",
        ReviewRating::Exceeding => "exceeding",
    }
}

fn status_label(locale: Locale, status: GoalStatus) -> String {
    let key = match status {
        GoalStatus::Locked => "status.locked",
        GoalStatus::Available => "status.available",
        GoalStatus::Active => "status.active",
        GoalStatus::Paused => "status.paused",
        GoalStatus::Achieved => "status.achieved",
    };
    translate(locale, key, &[])
}

fn period_label(locale: Locale, frequency: GoalFrequency) -> String {
    let key = match frequency {
        GoalFrequency::Daily => "period.day",
        GoalFrequency::Weekly => "period.week",
        _ => "period.month",
    };
    translate(locale, key, &[])
}

fn period_label_plural(locale: Locale, frequency: GoalFrequency) -> String {
    let key = match frequency {
        GoalFrequency::Daily => "period.days",
        GoalFrequency::Weekly => "period.weeks",
        _ => "period.months",
    };
    translate(locale, key, &[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_takes_only_an_obstacle_id() {
        let cli = Cli::try_parse_from([
            "stride",
            "obstacle",
            "resolve",
            "01H455VB4PEX5VSVPTM8FP4N3K",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Obstacle {
                action: ObstacleAction::Resolve { .. }
            }
        ));
    }

    #[test]
    fn capture_requires_goal_and_description() {
        let cli =
            Cli::try_parse_from(["stride", "obstacle", "add", "morning-run", "knee pain"]).unwrap();
        match cli.command {
            Commands::Obstacle {
                action: ObstacleAction::Add { id, description },
            } => {
                assert_eq!(id, "morning-run");
                assert_eq!(description, "knee pain");
            }
            _ => panic!("parsed into the wrong command"),
        }

        assert!(Cli::try_parse_from(["stride", "obstacle", "add", "morning-run"]).is_err());
    }
}
