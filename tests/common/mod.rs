#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use chatgraph::error::{ChatGraphError, ChatGraphResult};
use chatgraph::model::*;
use chatgraph::source::MessagingSource;

pub fn wid(s: &str) -> Wid {
    Wid::parse(s).unwrap()
}

pub fn owned(id: &str, phone: Option<&str>, name: Option<&str>) -> RawContact {
    RawContact {
        id: Some(wid(id)),
        phone_number: phone.map(str::to_string),
        address_book_name: name.map(str::to_string),
        profile_nickname: None,
        is_owned_contact: true,
        profile_pic_url: None,
    }
}

pub fn stranger(id: &str, phone: Option<&str>, nickname: Option<&str>) -> RawContact {
    RawContact {
        id: Some(wid(id)),
        phone_number: phone.map(str::to_string),
        address_book_name: None,
        profile_nickname: nickname.map(str::to_string),
        is_owned_contact: false,
        profile_pic_url: None,
    }
}

pub fn group(id: &str, name: &str, members: &[&str]) -> RawChat {
    RawChat::group(wid(id), Some(name), members.iter().map(|m| wid(m)).collect())
}

pub fn group_record(id: &str, name: &str, members: &[&str]) -> GroupRecord {
    GroupRecord::from_chat(&group(id, name, members)).unwrap()
}

/// In-memory source. Lookups are counted per id; ids in `failing` error out.
#[derive(Default)]
pub struct FakeSource {
    pub contacts: Vec<RawContact>,
    pub chats: Vec<RawChat>,
    pub failing: Vec<Wid>,
    pub pictures: HashMap<Wid, Option<String>>,
    pub lookups: Cell<usize>,
    pub looked_up: RefCell<Vec<Wid>>,
}

impl FakeSource {
    pub fn new(contacts: Vec<RawContact>, chats: Vec<RawChat>) -> Self {
        Self {
            contacts,
            chats,
            ..Self::default()
        }
    }

    pub fn lookups_for(&self, id: &str) -> usize {
        self.looked_up.borrow().iter().filter(|w| w.as_str() == id).count()
    }
}

impl MessagingSource for FakeSource {
    fn list_contacts(&self) -> ChatGraphResult<Vec<RawContact>> {
        Ok(self.contacts.clone())
    }

    fn list_chats(&self) -> ChatGraphResult<Vec<RawChat>> {
        Ok(self.chats.clone())
    }

    fn lookup_contact(&self, id: &Wid) -> ChatGraphResult<RawContact> {
        self.lookups.set(self.lookups.get() + 1);
        self.looked_up.borrow_mut().push(id.clone());
        if self.failing.contains(id) {
            return Err(ChatGraphError::Bridge("lookup timed out".into()));
        }
        self.contacts
            .iter()
            .find(|c| c.id.as_ref() == Some(id))
            .cloned()
            .ok_or_else(|| ChatGraphError::ContactNotFound { id: id.to_string() })
    }

    fn profile_pic_url(&self, id: &Wid) -> ChatGraphResult<Option<String>> {
        match self.pictures.get(id) {
            Some(url) => Ok(url.clone()),
            None => Err(ChatGraphError::Bridge("picture lookup failed".into())),
        }
    }
}
