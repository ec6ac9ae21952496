/// Builds a `Job` from an id, an optional storage-form date and an
/// optional name, leaving the remaining fields empty.
#[macro_export]
macro_rules! job {
    ( $id:expr ) => {
        ::job_board::job::Job::new($id)
    };
    ( $id:expr, $date:expr ) => {{
        let mut j = ::job_board::job::Job::new($id);
        j.date = $date.to_string();
        j
    }};
    ( $id:expr, $date:expr, $name:expr ) => {{
        let mut j = ::job_board::job::Job::new($id);
        j.date = $date.to_string();
        j.name = $name.to_string();
        j
    }};
}
