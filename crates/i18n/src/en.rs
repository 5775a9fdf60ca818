//! English message catalog.

/// All known message keys, used to keep the catalogs in sync.
#[cfg(test)]
pub(crate) const KEYS: &[&str] = &[
    "goals.created",
    "goals.alreadyExists",
    "goals.notFound",
    "goals.updated",
    "goals.deleted",
    "goals.achieved",
    "goals.unlocked",
    "goals.noGoalsToUnlock",
    "goals.listEmpty",
    "goals.listHeader",
    "goals.noGoalsNeedAttention",
    "goals.nextGoal",
    "review.registered",
    "review.periodProgress",
    "review.streak",
    "review.oneMoreToComplete",
    "review.periodCompleted",
    "review.maturityUp",
    "review.rememberWhy",
    "review.nextCheckIn",
    "obstacles.captured",
    "obstacles.resolved",
    "coaching.identityReminder",
    "coaching.riskAlert",
    "coaching.suggestion",
    "coaching.greatProgress",
    "coaching.needHelp",
    "coaching.keepGoing",
    "coaching.patternDetected",
    "coaching.suggestionAction",
    "period.day",
    "period.week",
    "period.month",
    "period.days",
    "period.weeks",
    "period.months",
    "status.locked",
    "status.available",
    "status.active",
    "status.paused",
    "status.achieved",
];

pub(crate) fn message(key: &str) -> Option<&'static str> {
    Some(match key {
        "goals.created" => "Goal \"{title}\" created.",
        "goals.alreadyExists" => "A goal with id {id} already exists.",
        "goals.notFound" => "Goal {id} not found.",
        "goals.updated" => "Goal \"{title}\" updated.",
        "goals.deleted" => "Goal \"{title}\" deleted.",
        "goals.achieved" => "🎉 Goal \"{title}\" achieved!",
        "goals.unlocked" => "🔓 Unlocked: {titles}",
        "goals.noGoalsToUnlock" => "No goals ready to unlock.",
        "goals.listEmpty" => "No goals yet.",
        "goals.listHeader" => "{count} goal(s):",
        "goals.noGoalsNeedAttention" => "Nothing needs attention right now.",
        "goals.nextGoal" => "Next up: \"{title}\"",
        "review.registered" => "Review registered.",
        "review.periodProgress" => "Progress: {current}/{target} {unit} this {period}.",
        "review.streak" => "🔥 {count} {period} active so far.",
        "review.oneMoreToComplete" => "One more to complete this {period}!",
        "review.periodCompleted" => "{period} COMPLETED! 🎉",
        "review.maturityUp" => "⬆️ Maturity level up: {level}. Check-ins spread out.",
        "review.rememberWhy" => "Remember why:",
        "review.nextCheckIn" => "Next check-in: {date}",
        "obstacles.captured" => "Obstacle captured.",
        "obstacles.resolved" => "Obstacle resolved.",
        "coaching.identityReminder" => "You said it yourself: {identity}",
        "coaching.riskAlert" => "It's been {days} days since your last check-in.",
        "coaching.suggestion" => "A small step today restarts the momentum.",
        "coaching.greatProgress" => "You're on a great run. Keep the bar where it is.",
        "coaching.needHelp" => "Recent check-ins look rough. Consider shrinking the goal.",
        "coaching.keepGoing" => "Steady progress. Keep going.",
        "coaching.patternDetected" => "Pattern: {description}",
        "coaching.suggestionAction" => "Try: {suggestion}",
        "period.day" => "day",
        "period.week" => "week",
        "period.month" => "month",
        "period.days" => "days",
        "period.weeks" => "weeks",
        "period.months" => "months",
        "status.locked" => "locked",
        "status.available" => "available",
        "status.active" => "active",
        "status.paused" => "paused",
        "status.achieved" => "achieved",
        _ => return None,
    })
}
