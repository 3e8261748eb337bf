use crate::cli::opts::*;
use crate::cli::session::ReviewSession;

use anyhow::{anyhow, Result};
use chrono::{Local, Utc};
use flipzy_core::{
    category_breakdown, filter_by_category, filter_by_text, get_stats, recently_added,
    recently_reviewed, Card, CardStore, Quality,
};
use flipzy_json::JsonStore;
use std::io::{stdin, stdout, Write};
use tracing::debug;
use uuid::Uuid;

pub fn run_cli(args: Cli) -> Result<()> {
    let store = open_store(&args)?;
    debug!(path = %store.path().display(), "using card store");
    match args.cmd {
        Command::Add(a) => add_cmd(&store, a),
        Command::List(l) => list_cmd(&store, l),
        Command::Show { card_id } => show_cmd(&store, &card_id),
        Command::Edit(e) => edit_cmd(&store, e),
        Command::Rm { card_id } => rm_cmd(&store, &card_id),
        Command::Review(r) => review_cmd(&store, r),
        Command::Stats => stats_cmd(&store),
        Command::Backup => backup_cmd(&store),
    }
}

fn open_store(args: &Cli) -> Result<JsonStore> {
    let store = match &args.data_dir {
        Some(dir) => JsonStore::open_in(dir)?,
        None => JsonStore::open_default()?,
    };
    Ok(store)
}

fn add_cmd(store: &JsonStore, a: CardAdd) -> Result<()> {
    let mut card = Card::new(Uuid::new_v4().to_string(), a.front, a.back)?.with_example(a.example);
    if let Some(c) = a.category {
        card = card.with_category(c);
    }
    let id = card.id.clone();
    store.add(card)?;
    println!("{id}");
    Ok(())
}

fn list_cmd(store: &JsonStore, l: ListCmd) -> Result<()> {
    let mut cards = store.load_all();
    if let Some(q) = &l.search {
        cards = filter_by_text(&cards, q);
    }
    if let Some(c) = &l.category {
        cards = filter_by_category(&cards, c);
    }
    let total = cards.len();
    for c in recently_added(&cards, l.limit.unwrap_or(total)) {
        println!(
            "{}\t{}\t{}\tcategory={}\treps={}\tinterval={}d",
            c.id, c.front, c.back, c.category, c.repetitions, c.interval
        );
    }
    Ok(())
}

fn show_cmd(store: &JsonStore, id: &str) -> Result<()> {
    let c = find_card(store, id)?;
    println!("id:            {}", c.id);
    println!("front:         {}", c.front);
    println!("back:          {}", c.back);
    println!("category:      {}", c.category);
    println!("example:       {}", c.example.as_deref().unwrap_or("-"));
    println!("created:       {}", local(c.created_at));
    println!("ease factor:   {:.2}", c.ease_factor);
    println!("interval:      {} day(s)", c.interval);
    println!("repetitions:   {}", c.repetitions);
    println!("next review:   {}", local(c.next_review));
    println!(
        "last reviewed: {}",
        c.last_reviewed.map(local).unwrap_or_else(|| "never".into())
    );
    Ok(())
}

fn edit_cmd(store: &JsonStore, e: CardEdit) -> Result<()> {
    let mut card = find_card(store, &e.card_id)?;
    let edit = flipzy_core::CardEdit {
        front: e.front,
        back: e.back,
        category: e.category,
        example: if e.clear_example { Some(None) } else { e.example.map(Some) },
    };
    if edit.is_empty() {
        println!("nothing to change");
        return Ok(());
    }
    edit.apply(&mut card)?;
    store.update_by_id(&card)?;
    println!("ok");
    Ok(())
}

fn rm_cmd(store: &JsonStore, id: &str) -> Result<()> {
    store.delete_by_id(id)?;
    println!("ok");
    Ok(())
}

fn review_cmd(store: &JsonStore, r: ReviewCmd) -> Result<()> {
    let mut session = ReviewSession::start(store, Utc::now(), r.max);
    if session.total() == 0 {
        println!("no cards due, check back later or add more cards");
        return Ok(());
    }

    loop {
        let pos = session.position();
        let Some(card) = session.next_card() else { break };
        println!("\n[{}/{}] {}", pos, session.total(), card.front);
        println!("category: {}", card.category);
        prompt_enter("[enter=show answer]")?;
        println!("A: {}", card.back);
        if let Some(ex) = &card.example {
            println!("e.g. {ex}");
        }
        for q in Quality::all() {
            println!("  {q} = {}", q.describe());
        }
        println!("  s = skip, q = quit");

        let quality = loop {
            let line = read_line("quality> ")?;
            match line.trim().to_lowercase().as_str() {
                "s" | "skip" => break None,
                "q" | "quit" => {
                    print_summary(&session);
                    return Ok(());
                }
                other => match other.parse::<Quality>() {
                    Ok(q) => break Some(q),
                    Err(e) => println!("{e}; enter 0-5, s, or q"),
                },
            }
        };

        match quality {
            Some(q) => {
                let updated = session.grade(store, card, q, Utc::now())?;
                println!("next review in {} day(s)", updated.interval);
            }
            None => session.skip(),
        }
    }

    print_summary(&session);
    Ok(())
}

fn print_summary(session: &ReviewSession) {
    println!(
        "\nreviewed {}, skipped {}",
        session.reviewed, session.skipped
    );
}

fn stats_cmd(store: &JsonStore) -> Result<()> {
    let cards = store.load_all();
    let s = get_stats(&cards);
    println!("total cards:     {}", s.total_cards);
    println!("due for review:  {}", s.due_for_review);
    println!("new cards:       {}", s.new_cards);
    println!("in progress:     {}", s.in_progress);
    println!("mastered:        {}", s.mastered);

    if cards.is_empty() {
        return Ok(());
    }

    println!("\nby category:");
    for (category, n) in category_breakdown(&cards) {
        println!("  {category}: {n}");
    }

    println!("\nrecent activity:");
    let recent = recently_reviewed(&cards, 10);
    if recent.is_empty() {
        println!("  no cards reviewed yet");
    }
    for c in recent {
        if let Some(at) = c.last_reviewed {
            println!(
                "  {} - last reviewed {} (repetitions: {}, interval: {} days)",
                c.front,
                local(at),
                c.repetitions,
                c.interval
            );
        }
    }
    Ok(())
}

fn backup_cmd(store: &JsonStore) -> Result<()> {
    match store.backup_now()? {
        Some(path) => println!("wrote {}", path.display()),
        None => println!("nothing to back up"),
    }
    Ok(())
}

// ===== Helpers =====
fn find_card(store: &JsonStore, id: &str) -> Result<Card> {
    store
        .get_by_id(id)
        .ok_or_else(|| anyhow!("card not found: {id}"))
}

fn local(at: chrono::DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

fn prompt_enter(label: &str) -> Result<()> {
    read_line(label).map(|_| ())
}

fn read_line(prompt: &str) -> Result<String> {
    print!("{prompt}");
    stdout().flush().ok();
    let mut s = String::new();
    if stdin().read_line(&mut s)? == 0 {
        return Err(anyhow!("input closed"));
    }
    Ok(s)
}
