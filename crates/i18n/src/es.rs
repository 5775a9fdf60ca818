//! Spanish message catalog.

pub(crate) fn message(key: &str) -> Option<&'static str> {
    Some(match key {
        "goals.created" => "Meta \"{title}\" creada.",
        "goals.alreadyExists" => "Ya existe una meta con id {id}.",
        "goals.notFound" => "No se encontró la meta {id}.",
        "goals.updated" => "Meta \"{title}\" actualizada.",
        "goals.deleted" => "Meta \"{title}\" eliminada.",
        "goals.achieved" => "🎉 ¡Meta \"{title}\" lograda!",
        "goals.unlocked" => "🔓 Desbloqueadas: {titles}",
        "goals.noGoalsToUnlock" => "No hay metas listas para desbloquear.",
        "goals.listEmpty" => "Aún no hay metas.",
        "goals.listHeader" => "{count} meta(s):",
        "goals.noGoalsNeedAttention" => "Nada necesita atención ahora mismo.",
        "goals.nextGoal" => "Siguiente: \"{title}\"",
        "review.registered" => "Revisión registrada.",
        "review.periodProgress" => "Progreso: {current}/{target} {unit} esta {period}.",
        "review.streak" => "🔥 {count} {period} activos hasta ahora.",
        "review.oneMoreToComplete" => "¡Una más para completar esta {period}!",
        "review.periodCompleted" => "¡{period} COMPLETADA! 🎉",
        "review.maturityUp" => "⬆️ Subiste de nivel de madurez: {level}. Las revisiones se espacian.",
        "review.rememberWhy" => "Recuerda por qué:",
        "review.nextCheckIn" => "Próxima revisión: {date}",
        "obstacles.captured" => "Obstáculo registrado.",
        "obstacles.resolved" => "Obstáculo resuelto.",
        "coaching.identityReminder" => "Tú mismo lo dijiste: {identity}",
        "coaching.riskAlert" => "Han pasado {days} días desde tu última revisión.",
        "coaching.suggestion" => "Un pequeño paso hoy reinicia el impulso.",
        "coaching.greatProgress" => "Llevas una gran racha. Mantén el nivel.",
        "coaching.needHelp" => "Las últimas revisiones se ven difíciles. Considera reducir la meta.",
        "coaching.keepGoing" => "Progreso constante. Sigue así.",
        "coaching.patternDetected" => "Patrón: {description}",
        "coaching.suggestionAction" => "Prueba: {suggestion}",
        "period.day" => "día",
        "period.week" => "semana",
        "period.month" => "mes",
        "period.days" => "días",
        "period.weeks" => "semanas",
        "period.months" => "meses",
        "status.locked" => "bloqueada",
        "status.available" => "disponible",
        "status.active" => "activa",
        "status.paused" => "pausada",
        "status.achieved" => "lograda",
        _ => return None,
    })
}
