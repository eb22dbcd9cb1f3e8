//! End-to-end scenarios for the mail engine.
//!
//! Most run against the in-memory store; the last ones exercise the JSON
//! store in a temporary directory.

#![allow(clippy::unwrap_used)]

use maildesk_core::{
    Account, AccountId, ComposeRequest, Error, Folder, FolderSnapshot, JsonStore, MailConfig,
    MailMessage, MailOrchestrator, MailStore, MemoryStore, MessageId, Priority, SendMode,
};

fn engine() -> MailOrchestrator<MemoryStore> {
    MailOrchestrator::new(MemoryStore::new(), MailConfig::default()).unwrap()
}

/// Engine with Alice and Bob registered and Alice signed in.
fn alice_and_bob() -> MailOrchestrator<MemoryStore> {
    let mut mail = engine();
    assert!(mail.create_account("Alice", "alice@x", "p1").unwrap());
    assert!(mail.create_account("Bob", "bob@y", "p2").unwrap());
    assert!(mail.login("alice@x", "p1").unwrap());
    mail
}

fn send(mail: &mut MailOrchestrator<impl MailStore>, to: &str, subject: &str) -> MessageId {
    mail.compose(ComposeRequest::new(to, subject, "body"), SendMode::Now)
        .unwrap()
}

fn folders_holding(mail: &MailOrchestrator<impl MailStore>, id: MessageId) -> Vec<Folder> {
    Folder::ALL
        .into_iter()
        .filter(|f| mail.folder(*f).contains(id))
        .collect()
}

fn incoming(from: &str, to: &str, subject: &str, priority: u8) -> MailMessage {
    MailMessage::new(MessageId::new(0), from, to, subject, "")
        .with_priority(Priority::new(priority).unwrap())
}

#[test]
fn duplicate_registration_is_refused() {
    let mut mail = engine();
    assert!(mail.create_account("Alice", "alice@x", "p1").unwrap());
    assert!(!mail.create_account("Alice Again", "alice@x", "other").unwrap());
    assert_eq!(mail.stats().users, 1);
    assert_eq!(mail.account("alice@x").unwrap().name, "Alice");
}

#[test]
fn delivery_routes_to_inbox_or_spam() {
    let mut mail = alice_and_bob();
    let lunch = send(&mut mail, "bob@y", "Lunch?");
    let prize = send(&mut mail, "bob@y", "You are a WINNER");
    assert_eq!(mail.folder(Folder::Sent).len(), 2);
    mail.logout().unwrap();

    assert!(mail.login("bob@y", "p2").unwrap());
    let inbox = mail.folder(Folder::Inbox).find(lunch).unwrap();
    assert!(!inbox.is_read);
    assert!(!inbox.is_spam);
    assert_eq!(inbox.sender, "alice@x");

    let spam = mail.folder(Folder::Spam).find(prize).unwrap();
    assert!(spam.is_spam);
    assert_eq!(spam.folder, Folder::Spam);
}

#[test]
fn login_reclassifies_received_mail_only() {
    let mut store = MemoryStore::new();
    store
        .save_account(&Account::new(AccountId::new(1), "Bob", "bob@y", "p2"))
        .unwrap();
    store
        .save_account(&Account::new(AccountId::new(2), "Alice", "alice@x", "p1"))
        .unwrap();

    let received = MailMessage::new(MessageId::new(2001), "alice@x", "bob@y", "Free offer", "");
    let trashed = MailMessage::new(MessageId::new(2002), "alice@x", "bob@y", "Bonus", "")
        .with_folder(Folder::Trash);
    let own_note = MailMessage::new(MessageId::new(2003), "bob@y", "bob@y", "Claim ticket", "");
    let outgoing = MailMessage::new(MessageId::new(2004), "bob@y", "alice@x", "Gift ideas", "")
        .with_folder(Folder::Sent);
    let snapshot = FolderSnapshot::from_messages([received, trashed, own_note, outgoing]);
    store.save_folders("bob@y", &snapshot).unwrap();

    let mut mail = MailOrchestrator::new(store, MailConfig::default()).unwrap();
    assert!(mail.login("bob@y", "p2").unwrap());

    assert_eq!(folders_holding(&mail, MessageId::new(2001)), [Folder::Spam]);
    assert!(mail.folder(Folder::Spam).find(MessageId::new(2001)).unwrap().is_spam);
    assert_eq!(folders_holding(&mail, MessageId::new(2002)), [Folder::Trash]);
    assert_eq!(folders_holding(&mail, MessageId::new(2003)), [Folder::Inbox]);
    assert_eq!(folders_holding(&mail, MessageId::new(2004)), [Folder::Sent]);
}

#[test]
fn delete_undo_redo_keeps_one_folder() {
    let mut mail = alice_and_bob();
    let id = send(&mut mail, "bob@y", "Minutes");

    mail.delete_with_undo(id, Folder::Sent).unwrap();
    assert_eq!(folders_holding(&mail, id), [Folder::Trash]);
    assert!(mail.stats().can_undo);

    assert_eq!(mail.undo().unwrap(), Some(id));
    assert_eq!(folders_holding(&mail, id), [Folder::Sent]);
    assert!(mail.stats().can_redo);

    assert_eq!(mail.redo().unwrap(), Some(id));
    assert_eq!(folders_holding(&mail, id), [Folder::Trash]);

    assert_eq!(mail.undo().unwrap(), Some(id));
    assert_eq!(mail.undo().unwrap(), None);
    assert_eq!(folders_holding(&mail, id), [Folder::Sent]);
}

#[test]
fn activity_log_keeps_the_latest_twenty() {
    let mut mail = engine();
    for n in 0..25 {
        mail.log_activity(format!("entry {n}"));
    }
    let log: Vec<&str> = mail.activity().map(|e| e.description.as_str()).collect();
    assert_eq!(log.len(), 20);
    assert_eq!(log[0], "entry 5");
    assert_eq!(log[19], "entry 24");
}

#[test]
fn anonymous_mutations_fail() {
    let mut mail = engine();
    mail.create_account("Alice", "alice@x", "p1").unwrap();
    let id = MessageId::new(1001);
    let request = ComposeRequest::new("alice@x", "Hi", "");

    assert!(matches!(mail.compose(request, SendMode::Now), Err(Error::NotAuthenticated)));
    assert!(matches!(mail.delete(id, Folder::Inbox), Err(Error::NotAuthenticated)));
    assert!(matches!(mail.delete_with_undo(id, Folder::Inbox), Err(Error::NotAuthenticated)));
    assert!(matches!(mail.undo(), Err(Error::NotAuthenticated)));
    assert!(matches!(mail.redo(), Err(Error::NotAuthenticated)));
    assert!(matches!(mail.recover_last_deleted(), Err(Error::NotAuthenticated)));
    assert!(matches!(mail.mark_read(id), Err(Error::NotAuthenticated)));
    assert!(matches!(mail.mark_spam(id), Err(Error::NotAuthenticated)));
    assert!(matches!(mail.empty_trash(), Err(Error::NotAuthenticated)));
    assert!(matches!(
        mail.enqueue_incoming(incoming("bob@y", "alice@x", "Hi", 0)),
        Err(Error::NotAuthenticated)
    ));
    assert!(matches!(mail.process_incoming(), Err(Error::NotAuthenticated)));
    assert!(matches!(mail.process_scheduled(), Err(Error::NotAuthenticated)));
    assert!(matches!(mail.open_folder(Folder::Inbox), Err(Error::NotAuthenticated)));
    assert!(matches!(mail.connect("alice@x"), Err(Error::NotAuthenticated)));
    assert!(matches!(mail.logout(), Err(Error::NotAuthenticated)));

    assert!(mail.search("Hi").is_empty());
    assert!(mail.contacts().is_empty());
    assert!(mail.current_account().is_none());
}

#[test]
fn scheduled_messages_send_in_order() {
    let mut mail = alice_and_bob();
    let first = mail
        .compose(ComposeRequest::new("bob@y", "First", ""), SendMode::Schedule)
        .unwrap();
    let second = mail
        .compose(ComposeRequest::new("bob@y", "Second", ""), SendMode::Schedule)
        .unwrap();
    assert_eq!(mail.stats().scheduled, 2);
    assert!(mail.folder(Folder::Sent).is_empty());

    assert_eq!(mail.process_scheduled().unwrap(), 2);
    let sent: Vec<MessageId> = mail.folder(Folder::Sent).messages().iter().map(|m| m.id).collect();
    assert_eq!(sent, [first, second]);
    assert_eq!(mail.stats().scheduled, 0);

    let bob = mail.store().load_messages("bob@y").unwrap();
    assert_eq!(bob.folder(Folder::Inbox).len(), 2);
    assert_eq!(mail.process_scheduled().unwrap(), 0);
}

#[test]
fn incoming_pipeline_feeds_priority_queue() {
    let mut mail = alice_and_bob();
    mail.enqueue_incoming(incoming("bob@y", "alice@x", "Status", 1)).unwrap();
    mail.enqueue_incoming(incoming("bob@y", "alice@x", "Outage", 5)).unwrap();
    mail.enqueue_incoming(incoming("bob@y", "alice@x", "Urgent prize", 5)).unwrap();
    mail.enqueue_incoming(incoming("bob@y", "alice@x", "Review", 3)).unwrap();
    assert_eq!(mail.stats().incoming, 4);

    assert_eq!(mail.process_incoming().unwrap(), 4);
    let stats = mail.stats();
    assert_eq!(stats.incoming, 0);
    assert_eq!(stats.priority, 2);
    assert_eq!(stats.folder(Folder::Inbox).unwrap().count, 3);
    assert_eq!(stats.folder(Folder::Spam).unwrap().count, 1);

    let subjects: Vec<String> = std::iter::from_fn(|| mail.next_priority_message().unwrap())
        .map(|m| m.subject)
        .collect();
    assert_eq!(subjects, ["Outage", "Review"]);

    let ranked: Vec<&str> = mail
        .messages_by_priority(Folder::Inbox)
        .iter()
        .map(|m| m.priority.value())
        .map(|p| match p {
            5 => "high",
            3 => "mid",
            _ => "low",
        })
        .collect();
    assert_eq!(ranked, ["high", "mid", "low"]);
    assert_eq!(mail.organize_by_timestamp(2).len(), 2);
}

#[test]
fn recover_last_deleted_returns_to_inbox() {
    let mut mail = alice_and_bob();
    let sent = send(&mut mail, "bob@y", "Report");
    let draft = mail
        .compose(ComposeRequest::new("", "Notes", ""), SendMode::Draft)
        .unwrap();

    mail.delete(sent, Folder::Sent).unwrap();
    mail.delete(draft, Folder::Drafts).unwrap();
    assert_eq!(mail.folder(Folder::Trash).len(), 2);

    assert_eq!(mail.recover_last_deleted().unwrap(), Some(draft));
    assert_eq!(folders_holding(&mail, draft), [Folder::Inbox]);
    assert_eq!(mail.recover_last_deleted().unwrap(), Some(sent));
    assert_eq!(folders_holding(&mail, sent), [Folder::Inbox]);
    assert_eq!(mail.recover_last_deleted().unwrap(), None);
    assert!(mail.folder(Folder::Trash).is_empty());
}

#[test]
fn every_id_lives_in_one_folder() {
    let mut mail = alice_and_bob();
    let note = send(&mut mail, "alice@x", "Note to self");
    let received = mail.folder(Folder::Inbox).recent().unwrap().id;
    assert_ne!(received, note);
    assert_eq!(folders_holding(&mail, note), [Folder::Sent]);
    assert_eq!(folders_holding(&mail, received), [Folder::Inbox]);

    mail.delete_with_undo(note, Folder::Sent).unwrap();
    mail.undo().unwrap();
    assert_eq!(mail.recover_last_deleted().unwrap(), None);
    assert_eq!(folders_holding(&mail, note), [Folder::Sent]);
    assert_eq!(mail.folder(Folder::Inbox).len(), 1);
}

#[test]
fn message_ids_are_never_reused() {
    let mut mail = alice_and_bob();
    let a = send(&mut mail, "bob@y", "a");
    mail.delete(a, Folder::Sent).unwrap();
    mail.empty_trash().unwrap();
    let b = send(&mut mail, "bob@y", "b");
    assert_eq!(a, MessageId::new(1001));
    assert!(b > a);
    mail.logout().unwrap();

    let mut reopened = MailOrchestrator::new(mail.into_store(), MailConfig::default()).unwrap();
    reopened.login("bob@y", "p2").unwrap();
    let c = send(&mut reopened, "alice@x", "c");
    assert!(c > b);
}

#[test]
fn session_survives_logout_and_login() {
    let mut mail = alice_and_bob();
    let id = send(&mut mail, "bob@y", "Keep me");
    mail.mark_important(id).unwrap();
    mail.add_contact("Bob", "bob@y", None).unwrap();
    mail.connect("bob@y").unwrap();
    mail.logout().unwrap();
    assert!(mail.folder(Folder::Important).is_empty());

    let mut reopened = MailOrchestrator::new(mail.into_store(), MailConfig::default()).unwrap();
    reopened.login("alice@x", "p1").unwrap();
    assert_eq!(folders_holding(&reopened, id), [Folder::Important]);
    assert_eq!(reopened.contacts().len(), 1);
    assert_eq!(reopened.spam_probability("bob@y").unwrap(), 80);
}

#[test]
fn json_store_round_trips_a_session() {
    let dir = tempfile::tempdir().unwrap();

    let (id, sent_copy) = {
        let store = JsonStore::open(dir.path()).unwrap();
        let mut mail = MailOrchestrator::new(store, MailConfig::default()).unwrap();
        mail.create_account("Alice", "alice@x", "p1").unwrap();
        mail.create_account("Bob", "bob@y", "p2").unwrap();
        mail.login("alice@x", "p1").unwrap();
        let request = ComposeRequest::new("bob@y", "Quarterly numbers", "See attached")
            .with_priority(4);
        let id = mail.compose(request, SendMode::Now).unwrap();
        let sent_copy = mail.folder(Folder::Sent).find(id).unwrap().clone();
        mail.logout().unwrap();
        (id, sent_copy)
    };

    let store = JsonStore::open(dir.path()).unwrap();
    let mut mail = MailOrchestrator::new(store, MailConfig::default()).unwrap();
    assert_eq!(mail.stats().users, 2);

    mail.login("alice@x", "p1").unwrap();
    assert_eq!(mail.folder(Folder::Sent).find(id), Some(&sent_copy));
    mail.logout().unwrap();

    mail.login("bob@y", "p2").unwrap();
    let received = mail.folder(Folder::Inbox).find(id).unwrap();
    assert_eq!(received.subject, "Quarterly numbers");
    assert_eq!(received.body, "See attached");
    assert_eq!(received.priority.value(), 4);
    assert_eq!(received.timestamp, sent_copy.timestamp);
    assert!(!received.is_read);
}

#[test]
fn json_store_persists_config_driven_trash_cleanup() {
    let dir = tempfile::tempdir().unwrap();
    let config = MailConfig {
        auto_delete_trash: true,
        ..MailConfig::default()
    };
    let store = JsonStore::open(dir.path()).unwrap();
    let mut mail = MailOrchestrator::new(store, config).unwrap();
    mail.create_account("Alice", "alice@x", "p1").unwrap();
    mail.login("alice@x", "p1").unwrap();
    let id = mail
        .compose(ComposeRequest::new("", "Scratch", ""), SendMode::Draft)
        .unwrap();
    mail.delete(id, Folder::Drafts).unwrap();
    mail.logout().unwrap();

    let stored = mail.store().load_messages("alice@x").unwrap();
    assert!(stored.is_empty());
}
