use super::*;

#[test]
fn short_content_is_one_page() {
    assert_eq!(paginate(500, 1123, &[], Pagination::MultiPage), vec![0..500]);
    assert_eq!(paginate(1123, 1123, &[], Pagination::MultiPage), vec![0..1123]);
}

#[test]
fn slices_at_page_boundaries_without_spans() {
    assert_eq!(
        paginate(2500, 1000, &[], Pagination::MultiPage),
        vec![0..1000, 1000..2000, 2000..2500]
    );
}

#[test]
fn cut_moves_above_a_straddling_line() {
    let spans = [(980, 1010)];
    assert_eq!(
        paginate(1500, 1000, &spans, Pagination::MultiPage),
        vec![0..980, 980..1500]
    );
}

#[test]
fn cut_follows_chained_spans() {
    let spans = [(990, 1005), (970, 995)];
    assert_eq!(
        paginate(1500, 1000, &spans, Pagination::MultiPage),
        vec![0..970, 970..1500]
    );
}

#[test]
fn oversized_span_falls_back_to_hard_cut() {
    let spans = [(100, 1900)];
    assert_eq!(
        paginate(2000, 1000, &spans, Pagination::MultiPage),
        vec![0..1000, 1000..2000]
    );
}

#[test]
fn clip_keeps_only_the_first_page() {
    assert_eq!(
        paginate(2500, 1000, &[], Pagination::ClipFirstPage),
        vec![0..1000]
    );
}

#[test]
fn pages_cover_content_exactly() {
    let spans: Vec<(u32, u32)> = (0..200).map(|i| (i * 37, i * 37 + 20)).collect();
    let pages = paginate(7000, 1123, &spans, Pagination::MultiPage);
    assert_eq!(pages.first().unwrap().start, 0);
    assert_eq!(pages.last().unwrap().end, 7000);
    for w in pages.windows(2) {
        assert_eq!(w[0].end, w[1].start);
    }
    for p in &pages {
        assert!(p.end - p.start <= 1123);
        assert!(p.end > p.start);
    }
}
