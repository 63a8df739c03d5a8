use chrono::NaiveDate;

/// SWIFT FIN line width for narrative fields.
pub const LINE_WIDTH: usize = 65;

/// Wrap text at the SWIFT line width, preserving embedded newlines. Words
/// longer than the width are split hard.
pub fn wrap(text: &str) -> String {
    let mut wrapped: Vec<String> = Vec::new();
    for line in text.lines() {
        if line.len() <= LINE_WIDTH {
            wrapped.push(line.to_string());
            continue;
        }
        let mut current = String::new();
        for word in line.split_whitespace() {
            if word.len() > LINE_WIDTH {
                if !current.is_empty() {
                    wrapped.push(std::mem::take(&mut current));
                }
                let mut rest = word;
                while rest.len() > LINE_WIDTH {
                    let (head, tail) = rest.split_at(LINE_WIDTH);
                    wrapped.push(head.to_string());
                    rest = tail;
                }
                current = rest.to_string();
                continue;
            }
            if current.is_empty() {
                current = word.to_string();
            } else if current.len() + 1 + word.len() <= LINE_WIDTH {
                current.push(' ');
                current.push_str(word);
            } else {
                wrapped.push(std::mem::take(&mut current));
                current = word.to_string();
            }
        }
        if !current.is_empty() {
            wrapped.push(current);
        }
    }
    wrapped.join("\n")
}

/// Fixed two-decimal amount rendering used in :32B:/:32A:.
pub fn swift_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}

/// YYYYMMDD rendering for an already-parsed date.
pub fn swift_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// ALLOWED / NOT ALLOWED vocabulary for shipment flags.
pub fn allowed(flag: bool) -> &'static str {
    if flag {
        "ALLOWED"
    } else {
        "NOT ALLOWED"
    }
}

/// One tag and its value lines. `render` emits the tag on its own line
/// followed by the value lines, matching the desk's established draft layout.
pub fn render_tag(tag: &str, value: &str) -> String {
    format!(":{tag}:\n{value}")
}

/// Applicant/beneficiary block: optional account line, then name, address
/// lines, and city/country.
pub fn party_block(
    account: &str,
    name: &str,
    address: &str,
    city: &str,
    country: &str,
) -> String {
    let mut lines: Vec<String> = Vec::new();
    if !account.trim().is_empty() {
        lines.push(format!("//{}", account.trim()));
    }
    lines.push(if name.trim().is_empty() {
        "NOT SPECIFIED".to_string()
    } else {
        name.trim().to_string()
    });
    for address_line in address.lines() {
        let trimmed = address_line.trim();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }
    if !city.trim().is_empty() {
        let mut city_line = city.trim().to_string();
        if !country.trim().is_empty() {
            city_line.push('/');
            city_line.push_str(country.trim());
        }
        lines.push(city_line);
    }
    lines.join("\n")
}

/// Simplified FIN header blocks 1-3. The session date comes from the caller so
/// repeated generation of the same draft produces identical envelopes.
pub fn fin_header(
    sender_bic: &str,
    receiver_bic: &str,
    message_type: &str,
    session_date: NaiveDate,
) -> String {
    let session = session_date.format("%y%m%d");
    format!(
        "{{1:F01{sender_bic}XXXX0000000000}}{{2:I{message_type}{receiver_bic}XXXXN}}{{3:{{108:{session}0000}}}}"
    )
}

/// FIN trailer block 5 with a placeholder checksum.
pub fn fin_trailer() -> String {
    "{5:{CHK:000000000000}}".to_string()
}

/// Wrap a message body in the FIN envelope (block 4 plus header/trailer).
pub fn fin_envelope(
    sender_bic: &str,
    receiver_bic: &str,
    message_type: &str,
    session_date: NaiveDate,
    body: &str,
) -> String {
    format!(
        "{}\n{{4:\n{}\n-}}\n{}",
        fin_header(sender_bic, receiver_bic, message_type, session_date),
        body,
        fin_trailer()
    )
}
