// Canned replies: the fixed commands and the degraded answers.

use super::responder_models::Command;

pub const HELP_TEXT: &str = "🤖 Доступные команды:

/help - Справка по командам
/info - Информация о боте

Просто задайте любой вопрос о релизах, и я отвечу на основе инструкции по отгрузке!";

pub const INFO_TEXT: &str = "ℹ️ О боте:

Я бот-помощник для работы с релизами музыки и клипов. Знаю все требования к отгрузке песен, клипов, видеошотов и текстов.

Моя база знаний включает:
• Требования к файлам и форматам
• Технические характеристики
• Правила оформления текстов
• Сроки и процессы отгрузки

Задавайте вопросы - помогу разобраться! 🎵";

/// Sent when the provider answered without any candidate text.
pub const NO_ANSWER_TEXT: &str =
    "Извините, не смог получить ответ. Попробуйте переформулировать вопрос.";

/// Sent when the generation call itself failed.
pub const GENERATION_FAILED_TEXT: &str = "К сожалению, произошла ошибка при обработке запроса. Попробуйте позже или задайте вопрос по-другому.";

/// Appended to the help text when answers may be grounded with web search.
pub const HELP_SEARCH_NOTE: &str = " Если не найду ответ в базе знаний, поищу в интернете.";

pub fn command_reply(command: Command, search_grounding: bool) -> String {
    match command {
        Command::Help if search_grounding => format!("{HELP_TEXT}{HELP_SEARCH_NOTE}"),
        Command::Help => HELP_TEXT.to_string(),
        Command::Info => INFO_TEXT.to_string(),
    }
}
