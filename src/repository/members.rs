use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use log::info;

use super::{load, save, try_load};
use crate::domain::ids::{generate_id, MEMBER_PREFIX};
use crate::domain::{Member, MembersDocument};
use crate::store::DocumentStore;

pub async fn load_all<S: DocumentStore>(store: &S) -> MembersDocument {
    load(store).await
}

pub async fn list_all<S: DocumentStore>(store: &S) -> Vec<Member> {
    load_all(store).await.members
}

pub async fn insert_member<S: DocumentStore>(
    store: &S,
    name: &str,
    phone: Option<&str>,
    join_date: NaiveDate,
) -> Result<Member> {
    if name.trim().is_empty() {
        bail!("Member name must not be empty");
    }

    let mut document: MembersDocument = try_load(store).await?;
    let member = Member::new(generate_id(MEMBER_PREFIX), name, phone, join_date);
    document.members.push(member.clone());
    save(store, &document).await?;

    info!("Registered member {} ({})", member.name, member.id);
    Ok(member)
}

pub async fn update_member<S: DocumentStore>(
    store: &S,
    id: &str,
    name: Option<&str>,
    phone: Option<&str>,
) -> Result<Member> {
    let mut document: MembersDocument = try_load(store).await?;
    let member = document
        .find_mut(id)
        .with_context(|| format!("No member with id {}", id))?;
    member.update(name, phone);
    let updated = member.clone();
    save(store, &document).await?;

    info!("Updated member {}", id);
    Ok(updated)
}

pub async fn delete_member<S: DocumentStore>(store: &S, id: &str) -> Result<Member> {
    let mut document: MembersDocument = try_load(store).await?;
    let removed = document
        .remove(id)
        .with_context(|| format!("No member with id {}", id))?;
    save(store, &document).await?;

    info!("Removed member {} ({})", removed.name, removed.id);
    Ok(removed)
}
