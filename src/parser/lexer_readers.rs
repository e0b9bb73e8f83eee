// Методы чтения отдельных токенов для лексического анализатора

impl Lexer {
    /// Пропускает однострочный комментарий `-- ...` до конца строки
    pub(crate) fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            self.advance();
        }
    }

    /// Пропускает многострочный комментарий `/* ... */`
    pub(crate) fn skip_block_comment(&mut self) -> Result<()> {
        let start_position = self.current_position;

        // Пропускаем "/*"
        self.advance();
        self.advance();

        loop {
            match self.peek() {
                Some('*') if self.peek_ahead(1) == Some('/') => {
                    self.advance();
                    self.advance();
                    return Ok(());
                }
                Some(_) => {
                    self.advance();
                }
                None => {
                    return Err(Error::UnterminatedLiteral {
                        kind: "block comment",
                        position: start_position,
                    })
                }
            }
        }
    }

    /// Читает содержимое до закрывающей кавычки; удвоенная кавычка означает саму кавычку
    fn read_quoted(&mut self, quote_char: char, kind: &'static str) -> Result<String> {
        let start_position = self.current_position;
        let mut value = String::new();

        self.advance(); // открывающая кавычка

        loop {
            match self.peek() {
                Some(ch) if ch == quote_char => {
                    self.advance();
                    if self.peek() == Some(quote_char) {
                        value.push(self.advance());
                    } else {
                        return Ok(value);
                    }
                }
                Some(_) => value.push(self.advance()),
                None => {
                    return Err(Error::UnterminatedLiteral {
                        kind,
                        position: start_position,
                    })
                }
            }
        }
    }

    /// Читает строковый литерал
    pub(crate) fn read_string_literal(&mut self) -> Result<Token> {
        let value = self.read_quoted('\'', "string literal")?;
        Ok(Token::String(value))
    }

    /// Читает идентификатор в кавычках (регистр сохраняется)
    pub(crate) fn read_quoted_identifier(&mut self) -> Result<Token> {
        let value = self.read_quoted('"', "quoted identifier")?;
        Ok(Token::Word(Word::quoted(value)))
    }

    /// Читает числовой литерал
    pub(crate) fn read_number(&mut self) -> Token {
        let mut value = String::new();
        let mut seen_dot = false;

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                value.push(self.advance());
            } else if ch == '.' && !seen_dot {
                // Точка входит в число, только если за ней следует цифра
                match self.peek_ahead(1) {
                    Some(next_ch) if next_ch.is_ascii_digit() => {
                        seen_dot = true;
                        value.push(self.advance());
                    }
                    _ => break,
                }
            } else if ch == 'e' || ch == 'E' {
                // Научная нотация: экспонента с необязательным знаком
                let exponent_digit = match self.peek_ahead(1) {
                    Some('+') | Some('-') => self.peek_ahead(2),
                    other => other,
                };
                if !exponent_digit.is_some_and(|d| d.is_ascii_digit()) {
                    break;
                }
                value.push(self.advance());
                if matches!(self.peek(), Some('+') | Some('-')) {
                    value.push(self.advance());
                }
                while let Some(digit) = self.peek().filter(|d| d.is_ascii_digit()) {
                    value.push(digit);
                    self.advance();
                }
                break;
            } else {
                break;
            }
        }

        Token::Number(value)
    }

    /// Читает идентификатор или ключевое слово
    pub(crate) fn read_identifier_or_keyword(&mut self) -> Token {
        let mut value = String::new();

        // Читаем буквы, цифры и подчеркивания
        while let Some(ch) = self.peek() {
            if ch.is_alphanumeric() || ch == '_' {
                value.push(self.advance());
            } else {
                break;
            }
        }

        match Keyword::lookup(&value) {
            Some(keyword) => Token::Keyword(keyword),
            None => Token::Word(Word::new(value)),
        }
    }

    /// Читает знак пунктуации или оператор
    pub(crate) fn read_symbol(&mut self) -> Result<Token> {
        let start_position = self.current_position;
        let current_char = self.advance();

        match classify_symbol(current_char, self.peek()) {
            Some((token, length)) => {
                for _ in 1..length {
                    self.advance();
                }
                Ok(token)
            }
            None => Err(Error::UnexpectedCharacter {
                character: current_char,
                position: start_position,
            }),
        }
    }
}
