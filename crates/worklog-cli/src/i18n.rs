//! Message catalog. Russian is the primary language (the tool's original
//! audience), English the secondary; the selection is persisted in config.

use wl_core::Lang;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Msg {
    Cancelled,
    Goodbye,
    ConfigMissing,
    RunSetup,

    ShortInputWarning,
    QuoteRight,
    QuoteWrong,
    Parsing,
    ParseFailed,
    TryPhrasing,
    ExamplePhrase,
    OrUseAliases,
    ExampleAliasPhrase,
    NothingExtracted,
    EnsureSpecified,
    HintTask,
    HintTime,
    HintDate,
    CheckingTasks,
    TasksNotFound,
    TasksNotAssigned,
    Preview,
    Total,
    ConfirmLog,
    LoggingN,
    FailedN,

    NoTaskFor,
    RecentLabel,
    ManualEntry,
    EnterTask,
    TaskFormat,
    SaveAliasQ,
    AliasSaved,

    SetupTitle,
    JiraUrlQ,
    UsernameQ,
    PasswordQ,
    ProjectKeyQ,
    AiProviderQ,
    ApiKeyQ,
    LanguageQ,
    UrlInvalid,
    ProjectKeyInvalid,
    TestingConnection,
    ConnectionOk,
    ConnectionFailed,
    CheckThese,
    CheckVpnLine,
    CheckUrlLine,
    CheckCredentialsLine,
    SetupDone,
    UsageHeader,
    UsageInteractive,
    UsageQuick,
    UsageTemplates,
    UsageAliases,

    TemplatesTitle,
    NoTemplates,
    TemplateNameQ,
    EntryN,
    TaskKeyQ,
    ActivityQ,
    HoursQ,
    HoursInvalid,
    AddMoreQ,
    TemplateCreated,
    TemplateUpdated,
    DeleteTemplateQ,
    TemplateDeleted,
    RunDateQ,
    Today,
    Yesterday,
    CustomDate,
    EnterDateQ,
    DateInvalid,

    ActionUse,
    ActionEdit,
    ActionDelete,
    ActionBack,
    ActionCreate,

    AliasesTitle,
    NoAliases,
    KeywordQ,
    DescriptionQ,
    AliasUpdated,
    DeleteAliasQ,
    AliasDeleted,

    NoHistory,
    RecentTasksHeader,

    WhatToDo,
    MenuQuick,
    MenuTemplates,
    MenuAliases,
    MenuStats,
    MenuSetup,
    MenuExit,
    EnterTextQ,
    Welcome,
    WelcomeSetupNeeded,
    StartSetupQ,
    RunSetupLater,

    CantConnect,
    BadCredentials,
    FixWithSetup,
    BadApiKey,
    GetKeyHeader,
    GetKeyAnthropic,
    GetKeyOpenAi,
    ConfigureSetup,
    RateLimited,
    RateLimitHint,
    TaskMissing,
    CheckTaskKey,
    GenericError,
    UnknownError,
    FooterHeader,
    FooterVpn,
    FooterBrowser,
    FooterSetup,
}

/// Looks up a message template. `{name}` placeholders are substituted with
/// [`fill`]. A language with no translation falls back to Russian.
pub fn tr(lang: Lang, msg: Msg) -> &'static str {
    let (ru, en) = catalog(msg);
    match lang {
        Lang::Ru => ru,
        Lang::En => en,
    }
}

pub fn fill(template: &str, params: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (key, value) in params {
        out = out.replace(&format!("{{{key}}}"), value);
    }
    out
}

fn catalog(msg: Msg) -> (&'static str, &'static str) {
    use Msg::*;
    match msg {
        Cancelled => ("Отменено", "Cancelled"),
        Goodbye => ("До свидания!", "Goodbye!"),
        ConfigMissing => ("Конфигурация не найдена", "Configuration not found"),
        RunSetup => ("Запустите: wl setup", "Run: wl setup"),

        ShortInputWarning => (
            "Ваш ввод выглядит слишком коротким.",
            "Your input looks too short.",
        ),
        QuoteRight => (
            "  Правильно: wl q \"вчера созвоны 4 часа\"",
            "  Right: wl q \"yesterday calls 4 hours\"",
        ),
        QuoteWrong => (
            "  Неправильно: wl q вчера созвоны 4 часа",
            "  Wrong: wl q yesterday calls 4 hours",
        ),
        Parsing => ("Парсинг через AI...", "Parsing with AI..."),
        ParseFailed => ("Не удалось распарсить ввод", "Could not parse the input"),
        TryPhrasing => ("Попробуйте:", "Try:"),
        ExamplePhrase => (
            "  \"вчера {key}-123 разработка 3 часа\"",
            "  \"yesterday {key}-123 development 3 hours\"",
        ),
        OrUseAliases => ("Или используйте aliases:", "Or use aliases:"),
        ExampleAliasPhrase => (
            "  \"сегодня {keyword} 2 часа\"",
            "  \"today {keyword} 2 hours\"",
        ),
        NothingExtracted => (
            "Не удалось извлечь записи из ввода",
            "No entries could be extracted from the input",
        ),
        EnsureSpecified => ("Убедитесь что указали:", "Make sure you specified:"),
        HintTask => ("  - Задачу или alias", "  - A task or an alias"),
        HintTime => ("  - Время (часы)", "  - Time (hours)"),
        HintDate => (
            "  - Дату (или \"сегодня\", \"вчера\")",
            "  - A date (or \"today\", \"yesterday\")",
        ),
        CheckingTasks => ("Проверка задач в Jira...", "Validating tasks in Jira..."),
        TasksNotFound => ("Задачи не найдены: {keys}", "Tasks not found: {keys}"),
        TasksNotAssigned => (
            "Задачи не назначены на вас: {keys}",
            "Tasks not assigned to you: {keys}",
        ),
        Preview => ("Предпросмотр:", "Preview:"),
        Total => ("Всего", "Total"),
        ConfirmLog => ("Залогировать?", "Log it?"),
        LoggingN => ("Логирование {n} записей...", "Logging {n} entries..."),
        FailedN => (
            "✗ Не удалось залогировать {n}:",
            "✗ Failed to log {n}:",
        ),

        NoTaskFor => (
            "Не найдена задача для \"{activity}\". Выберите:",
            "No task found for \"{activity}\". Choose:",
        ),
        RecentLabel => ("недавняя", "recent"),
        ManualEntry => ("Ввести вручную", "Enter manually"),
        EnterTask => ("Введите задачу:", "Enter task key:"),
        TaskFormat => ("Формат: PROJ-123", "Format: PROJ-123"),
        SaveAliasQ => (
            "Сохранить \"{keyword}\" как alias для {task}?",
            "Save \"{keyword}\" as an alias for {task}?",
        ),
        AliasSaved => (
            "✓ Alias сохранён: \"{keyword}\" → {task}",
            "✓ Alias saved: \"{keyword}\" → {task}",
        ),

        SetupTitle => ("Настройка WL", "WL setup"),
        JiraUrlQ => ("Jira URL:", "Jira URL:"),
        UsernameQ => ("Username:", "Username:"),
        PasswordQ => ("Password:", "Password:"),
        ProjectKeyQ => (
            "Project key (например, PROJ):",
            "Project key (e.g., PROJ):",
        ),
        AiProviderQ => ("AI provider:", "AI provider:"),
        ApiKeyQ => ("AI API key:", "AI API key:"),
        LanguageQ => ("Язык / Language:", "Язык / Language:"),
        UrlInvalid => (
            "URL должен начинаться с http:// или https://",
            "URL must start with http:// or https://",
        ),
        ProjectKeyInvalid => (
            "Project key должен содержать только заглавные буквы",
            "Project key must contain only uppercase letters",
        ),
        TestingConnection => (
            "Проверка подключения к Jira...",
            "Testing Jira connection...",
        ),
        ConnectionOk => (
            "✓ Подключение к Jira успешно",
            "✓ Jira connection successful",
        ),
        ConnectionFailed => (
            "Не удалось подключиться к Jira",
            "Could not connect to Jira",
        ),
        CheckThese => ("Проверьте:", "Check:"),
        CheckVpnLine => ("  - VPN подключен", "  - VPN is connected"),
        CheckUrlLine => ("  - URL правильный", "  - The URL is correct"),
        CheckCredentialsLine => (
            "  - Логин и пароль корректны",
            "  - Username and password are correct",
        ),
        SetupDone => ("✓ Настройка завершена!", "✓ Setup complete!"),
        UsageHeader => ("Теперь можно использовать:", "You can now use:"),
        UsageInteractive => (
            "  wl            - интерактивный режим",
            "  wl            - interactive mode",
        ),
        UsageQuick => (
            "  wl q \"текст\"  - быстрый лог через AI",
            "  wl q \"text\"   - quick AI log",
        ),
        UsageTemplates => ("  wl t          - templates", "  wl t          - templates"),
        UsageAliases => ("  wl a          - aliases", "  wl a          - aliases"),

        TemplatesTitle => ("Templates", "Templates"),
        NoTemplates => (
            "Нет templates. Создадим первый.",
            "No templates yet. Let's create one.",
        ),
        TemplateNameQ => ("Название template:", "Template name:"),
        EntryN => ("Entry {n}:", "Entry {n}:"),
        TaskKeyQ => ("Task key:", "Task key:"),
        ActivityQ => ("Описание работы:", "What was done:"),
        HoursQ => ("Часов:", "Hours:"),
        HoursInvalid => (
            "Введите число от 0 до 24",
            "Enter a number between 0 and 24",
        ),
        AddMoreQ => ("Добавить ещё одну запись?", "Add another entry?"),
        TemplateCreated => (
            "✓ Template \"{name}\" создан с {n} записями",
            "✓ Template \"{name}\" created with {n} entries",
        ),
        TemplateUpdated => ("✓ Template \"{name}\" обновлён", "✓ Template \"{name}\" updated"),
        DeleteTemplateQ => (
            "Удалить template \"{name}\"?",
            "Delete template \"{name}\"?",
        ),
        TemplateDeleted => ("✓ Template \"{name}\" удалён", "✓ Template \"{name}\" deleted"),
        RunDateQ => ("Дата для логирования:", "Date to log against:"),
        Today => ("Сегодня", "Today"),
        Yesterday => ("Вчера", "Yesterday"),
        CustomDate => ("Другая дата", "Another date"),
        EnterDateQ => ("Дата (YYYY-MM-DD):", "Date (YYYY-MM-DD):"),
        DateInvalid => ("Формат: YYYY-MM-DD", "Format: YYYY-MM-DD"),

        ActionUse => ("Использовать", "Use"),
        ActionEdit => ("Редактировать", "Edit"),
        ActionDelete => ("Удалить", "Delete"),
        ActionBack => ("← Назад", "← Back"),
        ActionCreate => ("+ Создать новый", "+ Create new"),

        AliasesTitle => ("Aliases", "Aliases"),
        NoAliases => (
            "Нет aliases. Создадим первый.",
            "No aliases yet. Let's create one.",
        ),
        KeywordQ => (
            "Keyword (например, \"созвоны\"):",
            "Keyword (e.g., \"calls\"):",
        ),
        DescriptionQ => ("Описание (опционально):", "Description (optional):"),
        AliasUpdated => (
            "✓ Alias обновлён: \"{keyword}\" → {task}",
            "✓ Alias updated: \"{keyword}\" → {task}",
        ),
        DeleteAliasQ => ("Удалить alias \"{keyword}\"?", "Delete alias \"{keyword}\"?"),
        AliasDeleted => ("✓ Alias \"{keyword}\" удалён", "✓ Alias \"{keyword}\" deleted"),

        NoHistory => ("Нет истории логирования", "No logging history yet"),
        RecentTasksHeader => ("Последние задачи:", "Recent tasks:"),

        WhatToDo => ("Что хотите сделать?", "What do you want to do?"),
        MenuQuick => ("Быстрый лог (AI)", "Quick log (AI)"),
        MenuTemplates => ("Управление templates", "Manage templates"),
        MenuAliases => ("Управление aliases", "Manage aliases"),
        MenuStats => ("Статистика", "Statistics"),
        MenuSetup => ("Настройки", "Settings"),
        MenuExit => ("← Выход", "← Exit"),
        EnterTextQ => ("Введите текст для парсинга:", "Text to parse:"),
        Welcome => ("👋 Добро пожаловать в WL!", "👋 Welcome to WL!"),
        WelcomeSetupNeeded => (
            "Сначала нужно настроить подключение к Jira.",
            "First, the Jira connection needs to be configured.",
        ),
        StartSetupQ => ("Начать настройку?", "Start setup?"),
        RunSetupLater => ("Запустите позже: wl setup", "Run later: wl setup"),

        CantConnect => ("Не могу подключиться к Jira", "Cannot connect to Jira"),
        BadCredentials => ("Неверный логин или пароль", "Invalid username or password"),
        FixWithSetup => ("Исправить: wl setup", "Fix it: wl setup"),
        BadApiKey => ("Неверный AI API ключ", "Invalid AI API key"),
        GetKeyHeader => ("Получить ключ:", "Get a key:"),
        GetKeyAnthropic => (
            "  Anthropic: https://console.anthropic.com/",
            "  Anthropic: https://console.anthropic.com/",
        ),
        GetKeyOpenAi => (
            "  OpenAI: https://platform.openai.com/api-keys",
            "  OpenAI: https://platform.openai.com/api-keys",
        ),
        ConfigureSetup => ("Настроить: wl setup", "Configure: wl setup"),
        RateLimited => (
            "Превышен лимит запросов к AI",
            "AI request rate limit exceeded",
        ),
        RateLimitHint => (
            "Попробуйте через минуту или используйте template: wl t",
            "Try again in a minute or use a template: wl t",
        ),
        TaskMissing => ("Задача не найдена в Jira", "Task not found in Jira"),
        CheckTaskKey => (
            "Проверьте номер задачи и попробуйте снова",
            "Check the task key and try again",
        ),
        GenericError => ("Ошибка: {msg}", "Error: {msg}"),
        UnknownError => ("Неизвестная ошибка", "Unknown error"),
        FooterHeader => ("Если проблема повторяется:", "If the problem persists:"),
        FooterVpn => ("  - Проверьте VPN", "  - Check your VPN"),
        FooterBrowser => (
            "  - Откройте Jira в браузере",
            "  - Open Jira in a browser",
        ),
        FooterSetup => (
            "  - Проверьте настройки: wl setup",
            "  - Check your settings: wl setup",
        ),
    }
}
