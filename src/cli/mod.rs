//! Interactive shell mirroring the savings dashboard: goal list, forms,
//! friend comparison, activity feed, and summary cards.

mod render;

use std::sync::Arc;

use chrono::NaiveDate;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use uuid::Uuid;

use crate::config::ConfigManager;
use crate::core::{
    Clock, ComparisonEntry, CompletionEvent, FixedMonthlyContribution, GoalFilter, GoalStore,
    GoalTracker, InMemoryGoalStore, NotificationSink, SystemClock,
};
use crate::currency::{default_locale, format_amount, LocaleConfig};
use crate::domain::{
    ActivityFeedItem, ActivityKind, Frequency, Goal, GoalVisibility, NewTransaction,
    PaymentMethod, RecurringTransaction, TransactionKind, User,
};
use crate::errors::{TrackerError, TrackerResult};

/// Prints the celebration banner the moment a completion edge fires.
struct CelebrationSink;

impl NotificationSink for CelebrationSink {
    fn goal_completed(&self, event: &CompletionEvent) {
        println!(
            "\n{}",
            format!("🎉 Parabéns! Meta \"{}\" conquistada! 🎉", event.goal_name)
                .yellow()
                .bold()
        );
    }
}

const MAIN_MENU: &[&str] = &[
    "Minhas metas",
    "Nova meta",
    "Registrar transação",
    "Aportes recorrentes",
    "Comparar com amigos",
    "Atividades",
    "Resumo",
    "Sair",
];

pub fn run() -> TrackerResult<()> {
    let config = match ConfigManager::new() {
        Ok(manager) => manager.load().unwrap_or_default(),
        Err(err) => {
            tracing::warn!(%err, "falling back to default configuration");
            Default::default()
        }
    };
    let locale = default_locale();
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let tracker_clock = Arc::clone(&clock);
    let estimator = Box::new(FixedMonthlyContribution::new(
        config.avg_monthly_contribution,
    ));
    let now = clock.now();
    let user = User::new("João Silva", "usuario@exemplo.com", now);
    let mut tracker = GoalTracker::new(
        Box::new(seed_store(&user, now)),
        tracker_clock,
        Arc::new(CelebrationSink),
        estimator,
    );
    let peers = seed_feed_and_peers(&mut tracker, now);

    let theme = ColorfulTheme::default();
    println!("{}", "cofrinho — suas metas de economia".bold());
    loop {
        println!();
        let choice = Select::with_theme(&theme)
            .with_prompt("Menu principal")
            .items(MAIN_MENU)
            .default(0)
            .interact()
            .map_err(ui_error)?;
        let result = match choice {
            0 => show_goals(&tracker, &theme, locale),
            1 => create_goal_form(&mut tracker, &user, &theme),
            2 => transaction_form(&mut tracker, &user, &theme, locale),
            3 => recurring_menu(&mut tracker, clock.as_ref(), &theme, locale),
            4 => show_comparison(&tracker, &user, &peers, locale),
            5 => show_feed(&tracker, clock.as_ref(), locale),
            6 => show_summary(&tracker, locale),
            _ => break,
        };
        if let Err(err) = result {
            println!("{} {err}", "Erro:".red().bold());
        }
    }
    Ok(())
}

fn show_goals(
    tracker: &GoalTracker,
    theme: &ColorfulTheme,
    locale: &LocaleConfig,
) -> TrackerResult<()> {
    let filters = ["Todas", "Ativas", "Conquistadas"];
    let selected = Select::with_theme(theme)
        .with_prompt("Filtro")
        .items(&filters)
        .default(0)
        .interact()
        .map_err(ui_error)?;
    let filter = match selected {
        1 => GoalFilter::Active,
        2 => GoalFilter::Completed,
        _ => GoalFilter::All,
    };

    let goals = tracker.goals_with_progress(filter)?;
    if goals.is_empty() {
        println!("{}", "Nenhuma meta aqui ainda. Crie a primeira!".italic());
        return Ok(());
    }
    for item in &goals {
        println!("\n{}", render::goal_card(item, locale));
    }
    Ok(())
}

fn create_goal_form(
    tracker: &mut GoalTracker,
    user: &User,
    theme: &ColorfulTheme,
) -> TrackerResult<()> {
    let name: String = Input::with_theme(theme)
        .with_prompt("Nome da meta")
        .interact_text()
        .map_err(ui_error)?;
    let target_amount: f64 = Input::with_theme(theme)
        .with_prompt("Valor alvo (R$)")
        .interact_text()
        .map_err(ui_error)?;
    let initial_cash: f64 = Input::with_theme(theme)
        .with_prompt("Saldo inicial em dinheiro")
        .default(0.0)
        .interact_text()
        .map_err(ui_error)?;
    let initial_pix: f64 = Input::with_theme(theme)
        .with_prompt("Saldo inicial em Pix")
        .default(0.0)
        .interact_text()
        .map_err(ui_error)?;
    let visibility = select_visibility(theme)?;

    let mut input = crate::core::NewGoal::new(name, target_amount);
    input.initial_cash = initial_cash;
    input.initial_pix = initial_pix;
    input.visibility = visibility;

    let goal = tracker.create_goal(user, input)?;
    println!("{} {}", "Meta criada:".green().bold(), goal.name);
    Ok(())
}

fn transaction_form(
    tracker: &mut GoalTracker,
    user: &User,
    theme: &ColorfulTheme,
    locale: &LocaleConfig,
) -> TrackerResult<()> {
    let Some(goal_id) = select_goal(tracker, theme)? else {
        return Ok(());
    };

    let kinds = ["Guardar (entrada)", "Retirar (saída)"];
    let kind = match Select::with_theme(theme)
        .with_prompt("Tipo")
        .items(&kinds)
        .default(0)
        .interact()
        .map_err(ui_error)?
    {
        0 => TransactionKind::Income,
        _ => TransactionKind::Expense,
    };
    let method = select_method(theme)?;
    let amount: f64 = Input::with_theme(theme)
        .with_prompt("Valor (R$)")
        .interact_text()
        .map_err(ui_error)?;
    let category: String = Input::with_theme(theme)
        .with_prompt("Categoria (opcional)")
        .allow_empty(true)
        .interact_text()
        .map_err(ui_error)?;

    let mut input = NewTransaction::new(kind, method, amount);
    input.category = non_empty(category);

    let applied = tracker.record_transaction(user, goal_id, input)?;
    println!(
        "{} saldo atual {}",
        "Registrado.".green().bold(),
        format_amount(applied.goal.total(), locale).bold()
    );
    Ok(())
}

fn recurring_menu(
    tracker: &mut GoalTracker,
    clock: &dyn Clock,
    theme: &ColorfulTheme,
    locale: &LocaleConfig,
) -> TrackerResult<()> {
    let actions = ["Listar vencidos", "Novo aporte recorrente", "Voltar"];
    let action = Select::with_theme(theme)
        .with_prompt("Aportes recorrentes")
        .items(&actions)
        .default(0)
        .interact()
        .map_err(ui_error)?;
    match action {
        0 => {
            let due = tracker.due_recurring(clock.today());
            if due.is_empty() {
                println!("{}", "Nenhum aporte vencido.".italic());
            }
            for template in due {
                println!(
                    "• {} {} ({}) — vence {}",
                    format_amount(template.amount, locale).green(),
                    template.method,
                    template.frequency,
                    crate::currency::format_date(template.next_due_date)
                );
            }
            Ok(())
        }
        1 => {
            let Some(goal_id) = select_goal(tracker, theme)? else {
                return Ok(());
            };
            let amount: f64 = Input::with_theme(theme)
                .with_prompt("Valor do aporte (R$)")
                .interact_text()
                .map_err(ui_error)?;
            let method = select_method(theme)?;
            let frequencies = ["Diário", "Semanal", "Mensal", "Anual"];
            let frequency = match Select::with_theme(theme)
                .with_prompt("Frequência")
                .items(&frequencies)
                .default(2)
                .interact()
                .map_err(ui_error)?
            {
                0 => Frequency::Daily,
                1 => Frequency::Weekly,
                3 => Frequency::Yearly,
                _ => Frequency::Monthly,
            };
            let starts_today = Confirm::with_theme(theme)
                .with_prompt("Primeiro vencimento hoje?")
                .default(true)
                .interact()
                .map_err(ui_error)?;
            let first_due: NaiveDate = if starts_today {
                clock.today()
            } else {
                frequency.next_date(clock.today())
            };

            let template = RecurringTransaction::new(
                goal_id,
                TransactionKind::Income,
                method,
                amount,
                frequency,
                first_due,
                clock.now(),
            );
            tracker.add_recurring(template)?;
            println!("{}", "Aporte recorrente registrado.".green().bold());
            Ok(())
        }
        _ => Ok(()),
    }
}

fn show_comparison(
    tracker: &GoalTracker,
    user: &User,
    peers: &[ComparisonEntry],
    locale: &LocaleConfig,
) -> TrackerResult<()> {
    let ranked = tracker.compare_with_friends(user, peers.to_vec())?;
    if ranked.is_empty() {
        println!("{}", "Conecte-se com amigos para comparar metas!".italic());
        return Ok(());
    }
    println!("{}", "Comparar com amigos".bold());
    for row in &ranked {
        println!("\n{}", render::comparison_row(row, locale));
    }
    Ok(())
}

fn show_feed(tracker: &GoalTracker, clock: &dyn Clock, locale: &LocaleConfig) -> TrackerResult<()> {
    let feed = tracker.activity_feed();
    if feed.is_empty() {
        println!("{}", "Nenhuma atividade ainda.".italic());
        return Ok(());
    }
    let now = clock.now();
    println!("{}", "Atividades".bold());
    for item in &feed {
        println!("{}", render::feed_line(item, now, locale));
    }
    Ok(())
}

fn show_summary(tracker: &GoalTracker, locale: &LocaleConfig) -> TrackerResult<()> {
    let summary = tracker.summary()?;
    println!("{}", render::summary_block(&summary, locale));
    Ok(())
}

fn select_goal(tracker: &GoalTracker, theme: &ColorfulTheme) -> TrackerResult<Option<Uuid>> {
    let goals = tracker.goals_with_progress(GoalFilter::All)?;
    if goals.is_empty() {
        println!("{}", "Crie uma meta primeiro.".italic());
        return Ok(None);
    }
    let labels: Vec<String> = goals
        .iter()
        .map(|item| {
            format!(
                "{} ({:.0}%)",
                item.goal.name, item.progress.progress_percentage
            )
        })
        .collect();
    let index = Select::with_theme(theme)
        .with_prompt("Meta")
        .items(&labels)
        .default(0)
        .interact()
        .map_err(ui_error)?;
    Ok(Some(goals[index].goal.id))
}

fn select_method(theme: &ColorfulTheme) -> TrackerResult<PaymentMethod> {
    let methods = ["Dinheiro", "Pix"];
    let selected = Select::with_theme(theme)
        .with_prompt("Método")
        .items(&methods)
        .default(1)
        .interact()
        .map_err(ui_error)?;
    Ok(match selected {
        0 => PaymentMethod::Cash,
        _ => PaymentMethod::Pix,
    })
}

fn select_visibility(theme: &ColorfulTheme) -> TrackerResult<GoalVisibility> {
    let options = ["Privada", "Amigos", "Pública"];
    let selected = Select::with_theme(theme)
        .with_prompt("Visibilidade")
        .items(&options)
        .default(0)
        .interact()
        .map_err(ui_error)?;
    Ok(match selected {
        1 => GoalVisibility::Friends,
        2 => GoalVisibility::Public,
        _ => GoalVisibility::Private,
    })
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn ui_error(err: dialoguer::Error) -> TrackerError {
    match err {
        dialoguer::Error::IO(inner) => TrackerError::Io(inner),
    }
}

/// Seeds the demo goal set shipped by the original product, newest first.
fn seed_store(user: &User, now: chrono::DateTime<chrono::Utc>) -> InMemoryGoalStore {
    let seeds: &[(&str, f64, f64, f64, GoalVisibility, bool)] = &[
        ("Moto Honda CG 160", 15000.0, 3500.0, 2800.0, GoalVisibility::Friends, false),
        ("PlayStation 5", 4500.0, 1200.0, 2100.0, GoalVisibility::Private, false),
        ("Viagem Nordeste", 8000.0, 7800.0, 200.0, GoalVisibility::Public, true),
        ("MacBook Pro M3", 18000.0, 5000.0, 3200.0, GoalVisibility::Friends, false),
    ];
    let mut store = InMemoryGoalStore::new();
    for (name, target, cash, pix, visibility, completed) in seeds.iter().rev().copied() {
        let mut goal = Goal::new(name, target, visibility, user.id, now);
        goal.current_cash = cash;
        goal.current_pix = pix;
        goal.is_completed = completed;
        if completed {
            goal.completed_at = Some(now);
        }
        // Seed ids are fresh, so insertion cannot collide.
        let _ = store.insert(goal);
    }
    store
}

/// Seeds the friends' feed entries and comparison summaries from the
/// original demo data.
fn seed_feed_and_peers(
    tracker: &mut GoalTracker,
    now: chrono::DateTime<chrono::Utc>,
) -> Vec<ComparisonEntry> {
    let maria = User::new("Maria Santos", "maria@exemplo.com", now);
    let pedro = User::new("Pedro Oliveira", "pedro@exemplo.com", now);
    let peers = vec![
        ComparisonEntry {
            user_id: maria.id,
            user_name: maria.name.clone(),
            goal_id: Uuid::new_v4(),
            goal_name: "iPhone 15 Pro".into(),
            total_cash: 2500.0,
            total_pix: 4200.0,
            total_amount: 6700.0,
            progress_percentage: 72.0,
            estimated_days: 45,
            is_self: false,
        },
        ComparisonEntry {
            user_id: pedro.id,
            user_name: pedro.name.clone(),
            goal_id: Uuid::new_v4(),
            goal_name: "Moto".into(),
            total_cash: 8000.0,
            total_pix: 5500.0,
            total_amount: 13500.0,
            progress_percentage: 90.0,
            estimated_days: 15,
            is_self: false,
        },
    ];

    tracker.push_feed_item(
        ActivityFeedItem::new(
            maria.id,
            maria.name.clone(),
            Uuid::new_v4(),
            "iPhone 15 Pro",
            ActivityKind::Transaction,
            now - chrono::Duration::hours(2),
        )
        .with_amount(1200.0, PaymentMethod::Pix),
    );
    tracker.push_feed_item(ActivityFeedItem::new(
        pedro.id,
        pedro.name,
        Uuid::new_v4(),
        "Carro Novo",
        ActivityKind::GoalCompleted,
        now - chrono::Duration::days(1),
    ));
    tracker.push_feed_item(ActivityFeedItem::new(
        maria.id,
        maria.name,
        Uuid::new_v4(),
        "Fundo de Emergência",
        ActivityKind::GoalCreated,
        now - chrono::Duration::days(2),
    ));

    peers
}
