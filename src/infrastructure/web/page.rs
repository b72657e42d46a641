//! 问答页面渲染
//!
//! 助手消息靠左，用户消息靠右；消息内容一律转义

use std::fmt::Write;

use crate::domain::{Message, Role};

const STYLE: &str = r#"
body { font-family: sans-serif; max-width: 720px; margin: 0 auto; padding: 24px; }
h1, .subtitle { text-align: center; }
.subtitle { color: gray; }
.row { display: flex; margin-bottom: 10px; }
.row.assistant { justify-content: flex-start; }
.row.user { justify-content: flex-end; }
.bubble { color: black; padding: 12px 16px; border-radius: 12px; max-width: 70%; }
.assistant .bubble { background-color: #FFF0E6; }
.user .bubble { background-color: #E8F4FF; text-align: right; }
.error { background-color: #FDECEA; color: #611A15; padding: 12px 16px; border-radius: 8px; margin-bottom: 16px; }
form.ask { display: flex; gap: 8px; }
form.ask input[type=text] { flex: 1; padding: 8px; }
"#;

/// 渲染整页
pub fn render_page(messages: &[Message], error: Option<&str>) -> String {
    let mut html = String::with_capacity(2048 + messages.len() * 256);

    html.push_str("<!DOCTYPE html>\n<html lang=\"ko\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>필라테스 Q&amp;A 챗봇</title>\n<style>");
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n");

    html.push_str("<h1>🧘 필라테스 Q&amp;A 챗봇</h1>\n");
    html.push_str("<p class=\"subtitle\">필라테스 관련 궁금한 내용을 질문해보세요!</p>\n<hr>\n");

    if let Some(error) = error {
        let _ = writeln!(
            html,
            "<div class=\"error\">답변을 생성하지 못했습니다: {}</div>",
            html_escape::encode_text(error)
        );
    }

    html.push_str("<h3>질문 입력</h3>\n");
    html.push_str(
        "<form class=\"ask\" method=\"post\" action=\"/ask\">\n\
         <input type=\"text\" name=\"query\" placeholder=\"예: 10월 3일은 수업이 있나요?\" autofocus>\n\
         <button type=\"submit\">질문하기</button>\n</form>\n",
    );

    html.push_str("<h3>📒 대화 기록</h3>\n");
    for message in messages {
        render_message(&mut html, message);
    }

    html.push_str("<hr>\n<form method=\"post\" action=\"/reset\">\n");
    html.push_str("<button type=\"submit\">대화 초기화 🗑</button>\n</form>\n");
    html.push_str("</body>\n</html>\n");

    html
}

fn render_message(html: &mut String, message: &Message) {
    let (class, label) = match message.role {
        Role::Assistant => ("assistant", "🤖 챗봇"),
        Role::User => ("user", "🙋 사용자"),
    };
    let content = html_escape::encode_text(&message.content).replace('\n', "<br>");

    let _ = writeln!(
        html,
        "<div class=\"row {class}\"><div class=\"bubble\"><b>{label}</b><br>{content}</div></div>"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_contains_form_and_reset() {
        let html = render_page(&[], None);
        assert!(html.contains("action=\"/ask\""));
        assert!(html.contains("name=\"query\""));
        assert!(html.contains("action=\"/reset\""));
        assert!(!html.contains("class=\"error\""));
    }

    #[test]
    fn test_messages_rendered_in_order_with_sides() {
        let messages = vec![
            Message::user("10월 3일 수업 있나요?"),
            Message::assistant("개천절은 휴무입니다."),
        ];
        let html = render_page(&messages, None);

        let user_pos = html.find("row user").unwrap();
        let bot_pos = html.find("row assistant").unwrap();
        assert!(user_pos < bot_pos);
        assert!(html.contains("개천절은 휴무입니다."));
    }

    #[test]
    fn test_content_is_escaped() {
        let html = render_page(&[Message::user("<script>alert(1)</script>\n둘째 줄")], Some("<b>x</b>"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("<br>둘째 줄"));
        assert!(html.contains("&lt;b&gt;x&lt;/b&gt;"));
    }
}
