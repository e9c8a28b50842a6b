//! Minimal TISS 3.05.00 schema synthesized when the official one is unavailable
//!
//! Covers exactly the element tree the assembler emits, so a freshly
//! generated document validates against it. Dates are `xs:date` and money
//! fields are `xs:decimal`; everything else is `xs:string`.

pub const FALLBACK_XSD: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"
           xmlns:ans="http://www.ans.gov.br/padroes/tiss/schemas"
           targetNamespace="http://www.ans.gov.br/padroes/tiss/schemas"
           elementFormDefault="qualified">

    <xs:element name="mensagemTISS">
        <xs:complexType>
            <xs:sequence>
                <xs:element name="cabecalho" type="ans:CabecalhoType"/>
                <xs:element name="corpo" type="ans:CorpoType"/>
                <xs:element name="rodape" type="ans:RodapeType"/>
            </xs:sequence>
            <xs:attribute name="version" type="xs:string" use="required"/>
        </xs:complexType>
    </xs:element>

    <xs:complexType name="CabecalhoType">
        <xs:sequence>
            <xs:element name="identificacaoOperadora" type="ans:IdentificacaoOperadoraType"/>
            <xs:element name="dadosPrestador" type="ans:DadosPrestadorType"/>
            <xs:element name="dataProcessamento" type="xs:date"/>
            <xs:element name="numeroProtocolo" type="xs:string"/>
        </xs:sequence>
    </xs:complexType>

    <xs:complexType name="IdentificacaoOperadoraType">
        <xs:sequence>
            <xs:element name="codigoOperadora" type="xs:string"/>
            <xs:element name="registroANS" type="xs:string"/>
        </xs:sequence>
    </xs:complexType>

    <xs:complexType name="DadosPrestadorType">
        <xs:sequence>
            <xs:element name="cnpjPrestador" type="xs:string"/>
            <xs:element name="registroANS" type="xs:string"/>
        </xs:sequence>
    </xs:complexType>

    <xs:complexType name="CorpoType">
        <xs:sequence>
            <xs:element name="dadosGuia" type="ans:DadosGuiaType"/>
        </xs:sequence>
    </xs:complexType>

    <xs:complexType name="DadosGuiaType">
        <xs:sequence>
            <xs:element name="identificacaoGuia" type="ans:IdentificacaoGuiaType"/>
            <xs:element name="dadosBeneficiario" type="ans:DadosBeneficiarioType"/>
            <xs:element name="dadosPrestador" type="ans:DadosPrestadorGuiaType"/>
            <xs:element name="dadosProfissionalExecutante" type="ans:DadosProfissionalType"/>
            <xs:element name="dadosProcedimento" type="ans:DadosProcedimentoType"/>
            <xs:element name="diagnostico" type="ans:DiagnosticoType"/>
            <xs:element name="valoresInformados" type="ans:ValoresInformadosType"/>
        </xs:sequence>
    </xs:complexType>

    <xs:complexType name="IdentificacaoGuiaType">
        <xs:sequence>
            <xs:element name="numeroGuiaPrestador" type="xs:string"/>
            <xs:element name="numeroGuiaOperadora" type="xs:string"/>
            <xs:element name="dataAutorizacao" type="xs:date"/>
            <xs:element name="senha" type="xs:string"/>
            <xs:element name="dataValidadeSenha" type="xs:date"/>
        </xs:sequence>
    </xs:complexType>

    <xs:complexType name="DadosBeneficiarioType">
        <xs:sequence>
            <xs:element name="numeroCarteira" type="xs:string"/>
            <xs:element name="nomeBeneficiario" type="xs:string"/>
            <xs:element name="dataNascimento" type="xs:date"/>
            <xs:element name="sexo" type="xs:string"/>
            <xs:element name="cpf" type="xs:string"/>
        </xs:sequence>
    </xs:complexType>

    <xs:complexType name="DadosPrestadorGuiaType">
        <xs:sequence>
            <xs:element name="cnpjPrestador" type="xs:string"/>
            <xs:element name="nomePrestador" type="xs:string"/>
            <xs:element name="enderecoPrestador" type="xs:string"/>
        </xs:sequence>
    </xs:complexType>

    <xs:complexType name="DadosProfissionalType">
        <xs:sequence>
            <xs:element name="nomeProfissional" type="xs:string"/>
            <xs:element name="conselhoProfissional" type="xs:string"/>
            <xs:element name="numeroRegistroProfissional" type="xs:string"/>
            <xs:element name="ufConselho" type="xs:string"/>
            <xs:element name="cbos" type="xs:string"/>
        </xs:sequence>
    </xs:complexType>

    <xs:complexType name="DadosProcedimentoType">
        <xs:sequence>
            <xs:element name="codigoProcedimento" type="xs:string"/>
            <xs:element name="descricaoProcedimento" type="xs:string"/>
            <xs:element name="dataProcedimento" type="xs:date"/>
            <xs:element name="valorProcedimento" type="xs:decimal"/>
        </xs:sequence>
    </xs:complexType>

    <xs:complexType name="DiagnosticoType">
        <xs:sequence>
            <xs:element name="codigoDiagnostico" type="xs:string"/>
            <xs:element name="descricaoDiagnostico" type="xs:string"/>
        </xs:sequence>
    </xs:complexType>

    <xs:complexType name="ValoresInformadosType">
        <xs:sequence>
            <xs:element name="valorTotalGeral" type="xs:decimal"/>
            <xs:element name="valorTotalProcedimentos" type="xs:decimal"/>
        </xs:sequence>
    </xs:complexType>

    <xs:complexType name="RodapeType">
        <xs:sequence>
            <xs:element name="dadosPrestador" type="ans:DadosPrestadorType"/>
            <xs:element name="dataProcessamento" type="xs:date"/>
            <xs:element name="valorTotalGeral" type="xs:decimal"/>
        </xs:sequence>
    </xs:complexType>

</xs:schema>
"#;
