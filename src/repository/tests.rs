//! Repository Integration Tests
//!
//! Ordered-collection behavior against an in-memory SQLite database.

#[cfg(test)]
mod tests {
    use crate::domain::ordering::is_contiguous;
    use crate::domain::{
        ContactForm, DomainError, Link, NewTestimonial, PageSettings, Profile, Section,
        SocialIconPlacement, SocialLink, SubmissionValues,
    };
    use crate::repository::{
        init_db, AnalyticsRepository, DbState, FormRepository, LinkRepository, OrderedRepository,
        ProfileRepository, Repository, SectionRepository, SocialLinkRepository,
        TestimonialRepository,
    };
    use crate::repository::{inserted_id, ready};
    use std::path::Path;

    const OWNER: &str = "user-owner";
    const INTRUDER: &str = "user-intruder";

    struct Fixture {
        db: DbState,
        profiles: ProfileRepository,
        sections: SectionRepository,
        links: LinkRepository,
    }

    async fn setup_test_db() -> Fixture {
        // Use in-memory database for tests
        let db = init_db(Path::new(":memory:")).await.expect("Failed to init test DB");
        Fixture {
            profiles: ProfileRepository::new(db.handle()),
            sections: SectionRepository::new(db.handle()),
            links: LinkRepository::new(db.handle()),
            db,
        }
    }

    async fn profile_with_section(f: &Fixture) -> (Profile, Section) {
        let profile = f.profiles.create(OWNER, "owner", None).await.unwrap();
        let section = f
            .sections
            .append(OWNER, &Section::new(0, profile.id, Some("Main".to_string())))
            .await
            .unwrap();
        (profile, section)
    }

    async fn add_link(f: &Fixture, section_id: u32, text: &str) -> Link {
        let url = format!("https://example.com/{}", text);
        f.links
            .append(OWNER, &Link::new(0, section_id, text.to_string(), url))
            .await
            .unwrap()
    }

    /// (text, index) pairs in index order
    async fn link_order(f: &Fixture, section_id: u32) -> Vec<(String, u32)> {
        f.links
            .children(section_id)
            .await
            .unwrap()
            .into_iter()
            .map(|l| (l.text, l.index))
            .collect()
    }

    fn pairs(expected: &[(&str, u32)]) -> Vec<(String, u32)> {
        expected.iter().map(|(t, i)| (t.to_string(), *i)).collect()
    }

    #[tokio::test]
    async fn test_append_assigns_next_index() {
        let f = setup_test_db().await;
        let (_, section) = profile_with_section(&f).await;

        let a = add_link(&f, section.id, "a").await;
        let b = add_link(&f, section.id, "b").await;
        let c = add_link(&f, section.id, "c").await;

        assert_eq!(section.index, 0);
        assert_eq!((a.index, b.index, c.index), (0, 1, 2));
        assert!(a.id > 0 && a.id != b.id);
    }

    #[tokio::test]
    async fn test_append_to_missing_parent() {
        let f = setup_test_db().await;
        profile_with_section(&f).await;

        let err = f
            .links
            .append(OWNER, &Link::new(0, 999, "x".to_string(), "https://x.io".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_append_rejects_invalid_link() {
        let f = setup_test_db().await;
        let (_, section) = profile_with_section(&f).await;

        let err = f
            .links
            .append(OWNER, &Link::new(0, section.id, "x".to_string(), "not a url".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert!(f.links.children(section.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_renumbers_later_siblings() {
        let f = setup_test_db().await;
        let (_, section) = profile_with_section(&f).await;
        let mut ids = Vec::new();
        for text in ["a", "b", "c", "d"] {
            ids.push(add_link(&f, section.id, text).await.id);
        }

        let removed = f.links.remove(OWNER, ids[1]).await.unwrap();
        assert_eq!(removed.text, "b");
        assert_eq!(removed.index, 1);

        assert_eq!(
            link_order(&f, section.id).await,
            pairs(&[("a", 0), ("c", 1), ("d", 2)])
        );
        assert!(f.links.find_by_id(ids[1]).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_reorder_applies_new_order() {
        let f = setup_test_db().await;
        let (_, section) = profile_with_section(&f).await;
        let a = add_link(&f, section.id, "a").await;
        let b = add_link(&f, section.id, "b").await;
        let c = add_link(&f, section.id, "c").await;

        f.links.reorder(OWNER, &[c.id, a.id, b.id]).await.unwrap();

        assert_eq!(
            link_order(&f, section.id).await,
            pairs(&[("c", 0), ("a", 1), ("b", 2)])
        );
    }

    #[tokio::test]
    async fn test_reorder_with_current_order_is_noop() {
        let f = setup_test_db().await;
        let (_, section) = profile_with_section(&f).await;
        let a = add_link(&f, section.id, "a").await;
        let b = add_link(&f, section.id, "b").await;

        let before = link_order(&f, section.id).await;
        f.links.reorder(OWNER, &[a.id, b.id]).await.unwrap();
        assert_eq!(link_order(&f, section.id).await, before);
    }

    #[tokio::test]
    async fn test_reorder_rejects_malformed_lists() {
        let f = setup_test_db().await;
        let (profile, section) = profile_with_section(&f).await;
        let a = add_link(&f, section.id, "a").await;
        let b = add_link(&f, section.id, "b").await;
        let c = add_link(&f, section.id, "c").await;

        let other = f
            .sections
            .append(OWNER, &Section::new(0, profile.id, None))
            .await
            .unwrap();
        let stranger = add_link(&f, other.id, "z").await;

        let before = link_order(&f, section.id).await;
        let cases: Vec<Vec<u32>> = vec![
            vec![],
            vec![c.id, a.id],
            vec![c.id, a.id, a.id, b.id],
            vec![c.id, a.id, b.id, stranger.id],
        ];
        for case in cases {
            let err = f.links.reorder(OWNER, &case).await.unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)), "{:?} gave {:?}", case, err);
            assert_eq!(link_order(&f, section.id).await, before);
        }
    }

    #[tokio::test]
    async fn test_reorder_unknown_id_changes_nothing() {
        let f = setup_test_db().await;
        let (_, section) = profile_with_section(&f).await;
        let a = add_link(&f, section.id, "a").await;
        let b = add_link(&f, section.id, "b").await;

        let before = link_order(&f, section.id).await;
        let err = f.links.reorder(OWNER, &[b.id, a.id, 4242]).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
        assert_eq!(link_order(&f, section.id).await, before);
    }

    #[tokio::test]
    async fn test_move_to_matches_drag_and_drop() {
        let f = setup_test_db().await;
        let (_, section) = profile_with_section(&f).await;
        add_link(&f, section.id, "a").await;
        add_link(&f, section.id, "b").await;
        let c = add_link(&f, section.id, "c").await;

        f.links.move_to(OWNER, c.id, 0).await.unwrap();
        assert_eq!(
            link_order(&f, section.id).await,
            pairs(&[("c", 0), ("a", 1), ("b", 2)])
        );

        f.links.move_to(OWNER, c.id, 50).await.unwrap();
        assert_eq!(
            link_order(&f, section.id).await,
            pairs(&[("a", 0), ("b", 1), ("c", 2)])
        );
    }

    #[tokio::test]
    async fn test_other_principal_is_forbidden() {
        let f = setup_test_db().await;
        let (profile, section) = profile_with_section(&f).await;
        let a = add_link(&f, section.id, "a").await;
        let b = add_link(&f, section.id, "b").await;
        f.profiles.create(INTRUDER, "intruder", None).await.unwrap();

        let before = link_order(&f, section.id).await;

        let forbidden = |r: Result<_, DomainError>| matches!(r, Err(DomainError::Forbidden(_)));
        assert!(forbidden(
            f.links
                .append(INTRUDER, &Link::new(0, section.id, "x".to_string(), "https://x.io".to_string()))
                .await
                .map(|_| ())
        ));
        assert!(forbidden(f.links.remove(INTRUDER, a.id).await.map(|_| ())));
        assert!(forbidden(f.links.reorder(INTRUDER, &[b.id, a.id]).await));
        assert!(forbidden(f.links.move_to(INTRUDER, b.id, 0).await));
        assert!(forbidden(f.links.find_owned(INTRUDER, a.id).await.map(|_| ())));
        assert!(forbidden(
            f.sections
                .append(INTRUDER, &Section::new(0, profile.id, None))
                .await
                .map(|_| ())
        ));
        assert!(forbidden(f.sections.remove(INTRUDER, section.id).await.map(|_| ())));

        assert_eq!(link_order(&f, section.id).await, before);
        assert_eq!(f.sections.children(profile.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_append_reorder_scenario() {
        let f = setup_test_db().await;
        let (_, section) = profile_with_section(&f).await;
        let a = add_link(&f, section.id, "a").await;
        let b = add_link(&f, section.id, "b").await;
        let c = add_link(&f, section.id, "c").await;

        f.links.remove(OWNER, b.id).await.unwrap();
        assert_eq!(link_order(&f, section.id).await, pairs(&[("a", 0), ("c", 1)]));

        let d = add_link(&f, section.id, "d").await;
        assert_eq!(d.index, 2);

        f.links.reorder(OWNER, &[c.id, d.id, a.id]).await.unwrap();
        assert_eq!(
            link_order(&f, section.id).await,
            pairs(&[("c", 0), ("d", 1), ("a", 2)])
        );
    }

    #[tokio::test]
    async fn test_indices_stay_contiguous() {
        let f = setup_test_db().await;
        let (_, section) = profile_with_section(&f).await;

        let mut ids = Vec::new();
        for n in 0..6 {
            ids.push(add_link(&f, section.id, &format!("l{}", n)).await.id);
        }
        f.links.remove(OWNER, ids[0]).await.unwrap();
        f.links.move_to(OWNER, ids[5], 1).await.unwrap();
        f.links.remove(OWNER, ids[3]).await.unwrap();
        let mut current: Vec<u32> = f.links.children(section.id).await.unwrap().iter().map(|l| l.id).collect();
        current.reverse();
        f.links.reorder(OWNER, &current).await.unwrap();
        add_link(&f, section.id, "tail").await;

        let indices: Vec<u32> = f.links.children(section.id).await.unwrap().iter().map(|l| l.index).collect();
        assert_eq!(indices.len(), 5);
        assert!(is_contiguous(&indices));
    }

    #[tokio::test]
    async fn test_update_keeps_index() {
        let f = setup_test_db().await;
        let (_, section) = profile_with_section(&f).await;
        add_link(&f, section.id, "a").await;
        let mut b = add_link(&f, section.id, "b").await;

        b.text = "renamed".to_string();
        b.hidden = true;
        b.index = 0;
        let updated = f.links.update(OWNER, &b).await.unwrap();

        assert_eq!(updated.text, "renamed");
        assert!(updated.hidden);
        assert_eq!(updated.index, 1);
    }

    #[tokio::test]
    async fn test_section_delete_cascades_and_renumbers() {
        let f = setup_test_db().await;
        let (profile, first) = profile_with_section(&f).await;
        let second = f
            .sections
            .append(OWNER, &Section::new(0, profile.id, Some("Second".to_string())))
            .await
            .unwrap();
        let link = add_link(&f, first.id, "a").await;

        let removed = f.sections.remove(OWNER, first.id).await.unwrap();
        assert_eq!(removed.name.as_deref(), Some("Main"));

        let remaining = f.sections.children(profile.id).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!((remaining[0].id, remaining[0].index), (second.id, 0));
        assert!(f.links.find_by_id(link.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_sections_with_links() {
        let f = setup_test_db().await;
        let (profile, first) = profile_with_section(&f).await;
        let second = f
            .sections
            .append(OWNER, &Section::new(0, profile.id, Some("Second".to_string())))
            .await
            .unwrap();
        add_link(&f, second.id, "s2").await;
        add_link(&f, first.id, "s1a").await;
        let mut hidden = add_link(&f, first.id, "s1b").await;
        hidden.hidden = true;
        f.links.update(OWNER, &hidden).await.unwrap();

        f.sections.reorder(OWNER, &[second.id, first.id]).await.unwrap();

        let all = f.sections.with_links(profile.id, true).await.unwrap();
        let names: Vec<_> = all.iter().map(|s| s.section.name.clone().unwrap()).collect();
        assert_eq!(names, vec!["Second", "Main"]);
        assert_eq!(all[1].links.len(), 2);

        let public = f.sections.with_links(profile.id, false).await.unwrap();
        assert_eq!(public[1].links.len(), 1);
        assert_eq!(public[1].links[0].text, "s1a");
    }

    #[tokio::test]
    async fn test_profile_uniqueness() {
        let f = setup_test_db().await;
        f.profiles.create(OWNER, "taken", None).await.unwrap();

        let again = f.profiles.create(OWNER, "other", None).await.unwrap_err();
        assert!(matches!(again, DomainError::Conflict(_)));

        let dup = f.profiles.create(INTRUDER, "taken", None).await.unwrap_err();
        assert!(matches!(dup, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_form_submissions() {
        let f = setup_test_db().await;
        let (profile, _) = profile_with_section(&f).await;
        let forms = FormRepository::new(f.db.handle());

        let form = forms.toggle(profile.id).await.unwrap().expect("form enabled");
        assert_eq!(form, ContactForm::new(profile.id));

        let values = SubmissionValues {
            name: Some("Ann".to_string()),
            message: Some("Hello".to_string()),
            ..Default::default()
        };
        let first = forms.add_submission(profile.id, &values).await.unwrap();
        let second = forms.add_submission(profile.id, &values).await.unwrap();

        let listed = forms.list_submissions(profile.id).await.unwrap();
        assert_eq!(listed.iter().map(|s| s.id).collect::<Vec<_>>(), vec![second.id, first.id]);

        let err = forms.delete_submission(INTRUDER, first.id).await.unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
        forms.delete_submission(OWNER, first.id).await.unwrap();
        assert_eq!(forms.list_submissions(profile.id).await.unwrap().len(), 1);

        assert!(forms.toggle(profile.id).await.unwrap().is_none());
        assert!(forms.find(profile.id).await.unwrap().is_none());
        assert_eq!(forms.list_submissions(profile.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_link_click_summary() {
        let f = setup_test_db().await;
        let (profile, section) = profile_with_section(&f).await;
        let a = add_link(&f, section.id, "a").await;
        let b = add_link(&f, section.id, "b").await;
        let analytics = AnalyticsRepository::new(f.db.handle());

        analytics.capture_click(b.id, profile.id, Some("agent".to_string())).await.unwrap();
        analytics.capture_click(b.id, profile.id, None).await.unwrap();

        let err = analytics.capture_click(a.id, profile.id + 1, None).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        let err = analytics.capture_click(999, profile.id, None).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));

        let summary = analytics.link_summary(profile.id).await.unwrap();
        assert_eq!(summary.len(), 2);
        assert_eq!((summary[0].link_id, summary[0].clicks), (a.id, 0));
        assert!(summary[0].last_clicked_at.is_none());
        assert_eq!((summary[1].link_id, summary[1].clicks), (b.id, 2));
        assert!(summary[1].last_clicked_at.is_some());
    }

    async fn section_names(f: &Fixture, profile_id: u32) -> Vec<(String, u32)> {
        f.sections
            .children(profile_id)
            .await
            .unwrap()
            .into_iter()
            .map(|s| (s.name.unwrap_or_default(), s.index))
            .collect()
    }

    async fn three_sections(f: &Fixture) -> (Profile, Vec<Section>) {
        let (profile, main) = profile_with_section(f).await;
        let mut sections = vec![main];
        for name in ["Second", "Third"] {
            let section = f
                .sections
                .append(OWNER, &Section::new(0, profile.id, Some(name.to_string())))
                .await
                .unwrap();
            sections.push(section);
        }
        (profile, sections)
    }

    #[tokio::test]
    async fn test_section_reorder_and_move() {
        let f = setup_test_db().await;
        let (profile, s) = three_sections(&f).await;

        f.sections.reorder(OWNER, &[s[2].id, s[0].id, s[1].id]).await.unwrap();
        assert_eq!(
            section_names(&f, profile.id).await,
            pairs(&[("Third", 0), ("Main", 1), ("Second", 2)])
        );

        f.sections.move_to(OWNER, s[2].id, 2).await.unwrap();
        assert_eq!(
            section_names(&f, profile.id).await,
            pairs(&[("Main", 0), ("Second", 1), ("Third", 2)])
        );
    }

    #[tokio::test]
    async fn test_section_reorder_rejects_malformed_lists() {
        let f = setup_test_db().await;
        let (profile, s) = three_sections(&f).await;

        let before = section_names(&f, profile.id).await;
        let cases: Vec<Vec<u32>> = vec![
            vec![],
            vec![s[1].id, s[0].id],
            vec![s[1].id, s[0].id, s[0].id, s[2].id],
        ];
        for case in cases {
            let err = f.sections.reorder(OWNER, &case).await.unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)), "{:?} gave {:?}", case, err);
            assert_eq!(section_names(&f, profile.id).await, before);
        }

        let err = f.sections.reorder(OWNER, &[s[0].id, s[1].id, 4242]).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
        assert_eq!(section_names(&f, profile.id).await, before);
    }

    #[tokio::test]
    async fn test_section_changes_by_other_principal_are_forbidden() {
        let f = setup_test_db().await;
        let (profile, s) = three_sections(&f).await;
        let intruder = f.profiles.create(INTRUDER, "intruder", None).await.unwrap();
        let own = f
            .sections
            .append(INTRUDER, &Section::new(0, intruder.id, None))
            .await
            .unwrap();

        let before = section_names(&f, profile.id).await;
        let err = f.sections.reorder(INTRUDER, &[s[2].id, s[1].id, s[0].id]).await.unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
        let err = f.sections.move_to(INTRUDER, s[0].id, 2).await.unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));

        let mut renamed = s[0].clone();
        renamed.name = Some("Taken over".to_string());
        let err = f.sections.update(INTRUDER, &renamed).await.unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));

        assert_eq!(section_names(&f, profile.id).await, before);
        assert_eq!(f.sections.children(intruder.id).await.unwrap(), vec![own]);
    }

    #[tokio::test]
    async fn test_update_by_other_principal_is_forbidden() {
        let f = setup_test_db().await;
        let (profile, section) = profile_with_section(&f).await;
        let mut link = add_link(&f, section.id, "a").await;
        f.profiles.create(INTRUDER, "intruder", None).await.unwrap();

        link.text = "hijacked".to_string();
        let err = f.links.update(INTRUDER, &link).await.unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
        assert_eq!(f.links.find_by_id(link.id).await.unwrap().unwrap().text, "a");

        let mut page = profile.clone();
        page.bio = Some("hijacked".to_string());
        let err = f.profiles.update(INTRUDER, &page).await.unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
        assert!(f.profiles.find_by_id(profile.id).await.unwrap().unwrap().bio.is_none());
    }

    #[tokio::test]
    async fn test_thumbnail_set_and_clear() {
        let f = setup_test_db().await;
        let (_, section) = profile_with_section(&f).await;
        let mut link = add_link(&f, section.id, "a").await;

        link.thumbnail = Some("https://img.example.com/a.png".to_string());
        link.thumbnail_public_id = Some("img-a".to_string());
        let stored = f.links.update(OWNER, &link).await.unwrap();
        assert_eq!(stored.thumbnail_public_id.as_deref(), Some("img-a"));

        link.thumbnail = None;
        link.thumbnail_public_id = None;
        f.links.update(OWNER, &link).await.unwrap();
        let cleared = f.links.find_by_id(link.id).await.unwrap().unwrap();
        assert!(cleared.thumbnail.is_none());
        assert!(cleared.thumbnail_public_id.is_none());
    }

    #[tokio::test]
    async fn test_update_settings() {
        let f = setup_test_db().await;
        let (profile, _) = profile_with_section(&f).await;

        let settings = PageSettings {
            seo_title: Some("Ann's links".to_string()),
            seo_description: None,
            social_icon_placement: SocialIconPlacement::Bottom,
        };
        let updated = f.profiles.update_settings(OWNER, &settings).await.unwrap();
        assert_eq!(updated.id, profile.id);
        assert_eq!(updated.settings, settings);

        let err = f.profiles.update_settings(INTRUDER, &settings).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_social_links_keep_their_own_order() {
        let f = setup_test_db().await;
        let (profile, _) = profile_with_section(&f).await;
        let social = SocialLinkRepository::new(f.db.handle());

        let mut ids = Vec::new();
        for icon in ["github", "mastodon", "youtube"] {
            let url = format!("https://{}.com/owner", icon);
            let link = social
                .append(OWNER, &SocialLink::new(0, profile.id, url, icon.to_string()))
                .await
                .unwrap();
            ids.push(link.id);
        }

        let err = social
            .append(OWNER, &SocialLink::new(0, profile.id, "https://x.io".to_string(), "Bad Icon".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        social.reorder(OWNER, &[ids[2], ids[0], ids[1]]).await.unwrap();
        let removed = social.remove(OWNER, ids[0]).await.unwrap();
        assert_eq!(removed.icon, "github");

        let order: Vec<(String, u32)> = social
            .children(profile.id)
            .await
            .unwrap()
            .into_iter()
            .map(|l| (l.icon, l.index))
            .collect();
        assert_eq!(order, pairs(&[("youtube", 0), ("mastodon", 1)]));

        f.profiles.create(INTRUDER, "intruder", None).await.unwrap();
        let err = social.move_to(INTRUDER, ids[1], 0).await.unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_testimonial_visibility() {
        let f = setup_test_db().await;
        let (profile, _) = profile_with_section(&f).await;
        let testimonials = TestimonialRepository::new(f.db.handle());

        let review = |name: &str| NewTestimonial {
            name: name.to_string(),
            email: format!("{}@example.com", name),
            message: "Great page".to_string(),
            rating: 5,
            avatar: None,
        };
        let first = testimonials.submit(profile.id, &review("bo")).await.unwrap();
        let second = testimonials.submit(profile.id, &review("cy")).await.unwrap();
        assert!(!first.should_show);

        let bad = NewTestimonial { rating: 9, ..review("dee") };
        let err = testimonials.submit(profile.id, &bad).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        assert!(testimonials.list(profile.id, true).await.unwrap().is_empty());
        let shown = testimonials.toggle_visibility(OWNER, first.id).await.unwrap();
        assert!(shown.should_show);

        let public = testimonials.list(profile.id, true).await.unwrap();
        assert_eq!(public.iter().map(|t| t.id).collect::<Vec<_>>(), vec![first.id]);
        let all = testimonials.list(profile.id, false).await.unwrap();
        assert_eq!(all.iter().map(|t| t.id).collect::<Vec<_>>(), vec![second.id, first.id]);

        let err = testimonials.toggle_visibility(INTRUDER, first.id).await.unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
        let err = testimonials.delete(INTRUDER, first.id).await.unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
        let err = testimonials.delete(OWNER, 999).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));

        testimonials.delete(OWNER, first.id).await.unwrap();
        assert!(testimonials.list(profile.id, true).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rowid_beyond_u32_is_internal_error() {
        let f = setup_test_db().await;
        let (profile, _) = profile_with_section(&f).await;

        let handle = f.db.handle();
        let guard = handle.lock().await;
        let conn = ready(&guard).unwrap();
        conn.execute(
            "INSERT INTO testimonials (id, profile_id, name, email, message, rating, created_at) VALUES (?, ?, 'a', 'a@b.io', 'hi', 5, 0)",
            rusqlite::params![5_000_000_000i64, profile.id],
        )
        .unwrap();

        let err = inserted_id(conn).unwrap_err();
        assert!(matches!(err, DomainError::Internal(_)));
    }
}
