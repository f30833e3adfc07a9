// SQL statements for the event repository

/// SQL for the events and event_dates tables
pub mod event_queries {
    /// Insert the event row and hand back the store-generated id
    pub const INSERT_EVENT: &str = r#"INSERT INTO events (name, start_min, end_min)
        VALUES ($1, $2, $3)
        RETURNING id"#;

    /// Insert every date of an event in one statement
    pub const INSERT_DATES: &str = r#"INSERT INTO event_dates (event_id, date)
        SELECT $1, d FROM UNNEST($2::date[]) AS d"#;

    /// Event joined with its dates, one row per date. An event without
    /// dates still yields one row with a NULL date.
    pub const SELECT_WITH_DATES: &str = r#"SELECT e.id, e.name, e.start_min, e.end_min, d.date
        FROM events e
        LEFT JOIN event_dates d ON d.event_id = e.id
        WHERE e.id = $1
        ORDER BY d.date"#;
}
