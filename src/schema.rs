// Table definitions for the link graph. Timestamps are RFC 3339 TEXT,
// booleans are INTEGER 0/1, string arrays and the custom-anchor map are
// JSON TEXT columns.

diesel::table! {
    articles (id) {
        id -> Integer,
        platform_id -> Integer,
        country_code -> Nullable<Text>,
        language_code -> Text,
        theme -> Nullable<Text>,
        title -> Text,
        content -> Text,
        status -> Text,
        created_at -> Text,
        updated_at -> Text,
    }
}

diesel::table! {
    internal_links (id) {
        id -> Integer,
        source_article_id -> Integer,
        target_article_id -> Integer,
        anchor_text -> Text,
        anchor_type -> Text,
        relevance_score -> Double,
        is_automatic -> Integer,
        created_at -> Text,
    }
}

diesel::table! {
    external_links (id) {
        id -> Integer,
        article_id -> Integer,
        url -> Text,
        domain -> Text,
        anchor_text -> Text,
        source_type -> Text,
        is_automatic -> Integer,
        verification_status -> Text,
        created_at -> Text,
    }
}

diesel::table! {
    authority_domains (id) {
        id -> Integer,
        domain -> Text,
        name -> Text,
        source_type -> Text,
        country_code -> Nullable<Text>,
        languages -> Text,
        topics -> Text,
        authority_score -> Double,
        is_active -> Integer,
    }
}

diesel::table! {
    affiliate_links (id) {
        id -> Integer,
        platform_id -> Integer,
        service_name -> Text,
        service_slug -> Text,
        tracking_url -> Text,
        commission_rate -> Double,
        commission_type -> Text,
        country_codes -> Nullable<Text>,
        language_codes -> Text,
        themes -> Text,
        custom_anchors -> Text,
        priority -> Integer,
        is_active -> Integer,
        starts_at -> Nullable<Text>,
        expires_at -> Nullable<Text>,
        created_at -> Text,
    }
}

diesel::table! {
    article_affiliate_links (id) {
        id -> Integer,
        article_id -> Integer,
        affiliate_link_id -> Integer,
        anchor_text -> Text,
        created_at -> Text,
    }
}

diesel::joinable!(external_links -> articles (article_id));
diesel::joinable!(article_affiliate_links -> articles (article_id));
diesel::joinable!(article_affiliate_links -> affiliate_links (affiliate_link_id));

diesel::allow_tables_to_appear_in_same_query!(
    articles,
    internal_links,
    external_links,
    authority_domains,
    affiliate_links,
    article_affiliate_links,
);
