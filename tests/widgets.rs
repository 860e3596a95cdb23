use folio::chat::{ChatPhase, ChatSession, ChatTimings, Origin};
use folio::config::SiteConfig;
use folio::content::SiteContent;
use folio::viewer::{Point, PointerButton, ViewerState};

fn stamp() -> String {
    "12:00 PM".to_string()
}

fn site_session() -> (SiteContent, ChatSession) {
    let content = SiteContent::load().expect("embedded content is valid");
    let timings = ChatTimings::from(&SiteConfig::default());
    let session = ChatSession::with_stamp(&content.chat, timings, stamp);
    (content, session)
}

fn run_until_idle(session: &mut ChatSession) {
    while let Some(due) = session.next_due() {
        session.advance_to(due);
    }
}

#[test]
fn selecting_the_third_question_on_a_fresh_widget() {
    let (content, mut session) = site_session();

    assert_eq!(session.transcript().len(), 1);
    assert_eq!(session.transcript()[0].text, content.chat.greeting);
    assert_eq!(session.available().len(), 8);

    session.select_option(3, 0).expect("option 3 is available");
    run_until_idle(&mut session);

    assert_eq!(session.transcript().len(), 3);
    assert_eq!(session.available().len(), 7);
    assert!(session.available().iter().all(|option| option.id != 3));

    let reply = &session.transcript()[2];
    assert_eq!(reply.origin, Origin::Bot);
    assert_eq!(reply.text, content.chat.options[2].reply);
}

#[test]
fn exhausting_every_question_appends_one_closing_message() {
    let (content, mut session) = site_session();
    let ids: Vec<u32> = content.chat.options.iter().map(|option| option.id).collect();
    let mut now = 0;

    for id in ids {
        session.select_option(id, now).expect("not yet asked");
        run_until_idle(&mut session);
        now += 60_000;
    }

    assert!(session.is_finished());
    assert!(session.available().is_empty());
    assert_eq!(session.phase(), ChatPhase::Idle);
    assert_eq!(session.transcript().len(), 1 + 8 * 2 + 1);

    let closings = session
        .transcript()
        .iter()
        .filter(|entry| entry.text == content.chat.closing)
        .count();
    assert_eq!(closings, 1);

    assert!(session.select_option(1, now).is_err());
    run_until_idle(&mut session);
    assert_eq!(session.transcript().len(), 18);
}

#[test]
fn viewer_opens_at_identity_and_zooms_in_three_steps() {
    let content = SiteContent::load().expect("embedded content is valid");
    let mut viewer = ViewerState::new(content.profile.cv.clone());

    viewer.open();
    assert_eq!(viewer.scale(), 1.0);
    assert_eq!(viewer.offset(), Point::ORIGIN);

    viewer.zoom_in();
    viewer.zoom_in();
    viewer.zoom_in();
    assert_eq!(viewer.scale(), 1.75);
    assert_eq!(viewer.zoom_percent(), 175);
}

#[test]
fn certificate_viewers_are_independent_instances() {
    let content = SiteContent::load().expect("embedded content is valid");
    let mut viewers: Vec<ViewerState> = content
        .education
        .iter()
        .flat_map(|entry| entry.certificates.iter())
        .map(|certificate| ViewerState::new(certificate.image.clone()))
        .collect();
    assert!(viewers.len() >= 2);

    viewers[0].open();
    viewers[0].begin_drag(Point::new(0.0, 0.0), PointerButton::Primary);
    viewers[0].continue_drag(Point::new(25.0, 10.0));

    assert_eq!(viewers[0].position_readout(), (25, 10));
    assert_eq!(viewers[1].offset(), Point::ORIGIN);
    assert!(!viewers[1].handle_key("+"));
}
