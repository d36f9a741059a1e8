//! Writers that put in-memory results on disk.

mod pictures;

pub use pictures::{
    download_pictures, download_pictures_with, read_contacts, DownloadStats, HttpFetcher,
    PictureFetcher,
};

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ChatGraphResult;
use crate::model::{groups_from_chats, CoMembership, SocialGraph};
use crate::source::ReadyHandle;

/// Outcome of a profile picture request for one contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum PictureStatus {
    /// Pictures were not requested for this export.
    NotRequested,
    /// The source reports no picture.
    Missing,
    Available { url: String },
    /// The request failed; the contact may still have a picture.
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryEntry {
    pub telephone_number: Option<String>,
    pub nickname: Option<String>,
    pub saved_name: Option<String>,
    pub profile_pic: PictureStatus,
}

/// Owned contacts keyed by id, and group membership lists keyed by group id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDirectory {
    pub contacts: BTreeMap<String, DirectoryEntry>,
    pub groups: BTreeMap<String, Vec<String>>,
}

/// Collects the owned contacts and group memberships a source serves.
pub fn contact_directory(
    handle: &ReadyHandle,
    fetch_pictures: bool,
) -> ChatGraphResult<ContactDirectory> {
    let source = handle.source();
    let mut directory = ContactDirectory::default();

    for contact in source.list_contacts()? {
        let Some(id) = contact.id.as_ref().filter(|_| contact.is_owned_contact) else {
            continue;
        };
        let profile_pic = if !fetch_pictures {
            PictureStatus::NotRequested
        } else {
            match source.profile_pic_url(id) {
                Ok(Some(url)) => PictureStatus::Available { url },
                Ok(None) => PictureStatus::Missing,
                Err(e) => {
                    tracing::debug!(contact = %id, error = %e, "profile picture lookup failed");
                    PictureStatus::Failed
                }
            }
        };
        let info = contact.info();
        directory.contacts.insert(
            id.to_string(),
            DirectoryEntry {
                telephone_number: info.phone_number,
                nickname: info.profile_nickname,
                saved_name: info.address_book_name,
                profile_pic,
            },
        );
    }

    for group in groups_from_chats(&source.list_chats()?) {
        directory.groups.insert(
            group.id.to_string(),
            group.participant_ids.iter().map(|p| p.to_string()).collect(),
        );
    }

    tracing::info!(
        contacts = directory.contacts.len(),
        groups = directory.groups.len(),
        "collected contact directory"
    );
    Ok(directory)
}

/// Writes `contacts.json` and `groups.json` into `dir`.
pub fn write_contact_directory(
    directory: &ContactDirectory,
    dir: &Path,
) -> ChatGraphResult<(PathBuf, PathBuf)> {
    fs::create_dir_all(dir)?;
    let contacts_path = dir.join("contacts.json");
    let groups_path = dir.join("groups.json");
    fs::write(&contacts_path, serde_json::to_string_pretty(&directory.contacts)?)?;
    fs::write(&groups_path, serde_json::to_string_pretty(&directory.groups)?)?;
    Ok((contacts_path, groups_path))
}

/// Writes `{prefix}_nodes.csv` and `{prefix}_edges.csv` into `dir`.
pub fn write_graph_csv(
    graph: &SocialGraph,
    dir: &Path,
    prefix: &str,
) -> ChatGraphResult<(PathBuf, PathBuf)> {
    fs::create_dir_all(dir)?;

    let mut nodes = String::from("Id,Label,Category\n");
    for node in &graph.nodes {
        nodes.push_str(&format!(
            "{},\"{}\",{}\n",
            node.id,
            clean_label(&node.label),
            node.category
        ));
    }

    let mut edges = String::from("Source,Target,Type\n");
    for edge in &graph.edges {
        edges.push_str(&format!("{},{},Undirected\n", edge.source, edge.target));
    }

    let nodes_path = dir.join(format!("{}_nodes.csv", prefix));
    let edges_path = dir.join(format!("{}_edges.csv", prefix));
    fs::write(&nodes_path, nodes)?;
    fs::write(&edges_path, edges)?;
    Ok((nodes_path, edges_path))
}

/// Writes a weighted undirected edge list.
pub fn write_co_membership_csv(pairs: &[CoMembership], path: &Path) -> ChatGraphResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut out = String::from("Source,Target,Type,Weight\n");
    for pair in pairs {
        out.push_str(&format!("{},{},Undirected,{}\n", pair.a, pair.b, pair.shared_groups));
    }
    fs::write(path, out)?;
    Ok(())
}

/// Labels are quoted in the CSV; quotes are dropped and commas become spaces.
fn clean_label(label: &str) -> String {
    label.replace('"', "").replace(',', " ")
}
