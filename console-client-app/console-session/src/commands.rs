use anyhow::{bail, Context};
use clap::ValueEnum;

use console_core::repositories::{MenuSource, PreferenceStore};
use console_core::services::{MenuScope, MenuView, SessionStore};

use crate::render;

/// Backend endpoint the menus are loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MenuSourceKind {
    /// `/menu/list`
    All,
    /// `/menu/current`
    Current,
    /// `/menu/user/{id}`
    User,
    /// `/permissions/user/{id}/permissions`
    Permissions,
}

pub fn menu_scope(source: Option<MenuSourceKind>, user: Option<u64>) -> anyhow::Result<MenuScope> {
    let source = source.unwrap_or(if user.is_some() {
        MenuSourceKind::Permissions
    } else {
        MenuSourceKind::All
    });

    Ok(match (source, user) {
        (MenuSourceKind::All, _) => MenuScope::All,
        (MenuSourceKind::Current, _) => MenuScope::Current,
        (MenuSourceKind::User, Some(id)) => MenuScope::User(id),
        (MenuSourceKind::Permissions, Some(id)) => MenuScope::Permissions(id),
        (kind, None) => bail!("--source {:?} needs --user", kind),
    })
}

pub async fn tree<S, M>(
    session: &mut SessionStore<S>,
    source: &M,
    scope: MenuScope,
    search: Option<String>,
    view: &str,
) -> anyhow::Result<()>
where
    S: PreferenceStore + ?Sized,
    M: MenuSource + ?Sized,
{
    let view: MenuView = view.parse()?;
    session
        .fetch_menus(source, scope)
        .await
        .context("failed to load menus")?;
    if let Some(text) = search {
        session.set_search_text(text);
    }

    let forest = session.menu_tree(view);
    if forest.is_empty() {
        println!("(no menus)");
    } else {
        print!("{}", render::menu_tree(&forest, &session.state().favorites));
    }
    Ok(())
}

pub async fn open<S, M>(
    session: &mut SessionStore<S>,
    source: &M,
    scope: MenuScope,
    id: u64,
) -> anyhow::Result<()>
where
    S: PreferenceStore + ?Sized,
    M: MenuSource + ?Sized,
{
    session
        .fetch_menus(source, scope)
        .await
        .context("failed to load menus")?;
    if !session.open_menu_by_id(id)? {
        println!("Menu {} is a group; nothing to open", id);
    }
    print!("{}", render::tab_strip(&session.state().tabs));
    Ok(())
}

pub fn favorite<S: PreferenceStore + ?Sized>(
    session: &mut SessionStore<S>,
    id: u64,
    add: bool,
) -> anyhow::Result<()> {
    if add {
        session.add_favorite(id);
    } else {
        session.remove_favorite(id);
    }
    println!("favorites: {:?}", session.state().favorites);
    Ok(())
}

pub fn recents<S: PreferenceStore + ?Sized>(session: &SessionStore<S>) -> anyhow::Result<()> {
    for id in &session.state().recents {
        println!("{}", id);
    }
    Ok(())
}

pub fn show_theme<S: PreferenceStore + ?Sized>(session: &SessionStore<S>) -> anyhow::Result<()> {
    let state = session.state();
    let origin = if state.theme_explicit { "saved" } else { "default" };
    println!("{} ({})", state.theme, origin);
    for (var, value) in state.theme.palette() {
        println!("  {}: {}", var, value);
    }
    Ok(())
}

pub fn set_theme<S: PreferenceStore + ?Sized>(
    session: &mut SessionStore<S>,
    name: &str,
) -> anyhow::Result<()> {
    session.set_theme(name)?;
    println!("{}", session.state().theme);
    Ok(())
}

pub fn toggle_theme<S: PreferenceStore + ?Sized>(session: &mut SessionStore<S>) -> anyhow::Result<()> {
    println!("{}", session.toggle_theme());
    Ok(())
}

pub fn show_watermark<S: PreferenceStore + ?Sized>(session: &SessionStore<S>) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&session.state().watermark)?);
    Ok(())
}

pub fn reset_watermark<S: PreferenceStore + ?Sized>(
    session: &mut SessionStore<S>,
) -> anyhow::Result<()> {
    session.reset_watermark();
    show_watermark(&*session)
}
